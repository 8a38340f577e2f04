use recfilter::{Engine, Record};
use std::io::{self, BufRead, Write};

fn main() {
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    let mut fields = None;
    let mut exclude_fields = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exclude" => exclude.push(args.next().expect("--exclude needs an expression")),
            "--fields" => fields = Some(args.next().expect("--fields needs a list")),
            "--exclude-fields" => {
                exclude_fields = Some(args.next().expect("--exclude-fields needs a list"))
            }
            _ => include.push(arg),
        }
    }

    let engine = match Engine::from_args(
        &include,
        &exclude,
        fields.as_deref(),
        exclude_fields.as_deref(),
    ) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let records = stdin.lock().lines().filter_map(|line| {
        let line = line.expect("could not read from stdin");
        if line.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Record>(&line) {
            Ok(record) => Some(record),
            Err(err) => {
                eprintln!("skipping malformed record: {err}");
                None
            }
        }
    });

    let mut filtered = engine.run(records);
    for record in filtered.by_ref() {
        serde_json::to_writer(&mut stdout, &record).expect("could not write to stdout");
        writeln!(stdout).expect("could not write to stdout");
    }

    let diagnostics = filtered.diagnostics();
    eprintln!(
        "{} of {} records matched",
        diagnostics.matched_count, diagnostics.input_count
    );
}
