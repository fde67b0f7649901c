use covreport::{cli::cli_parser::parse_cli, errors::ReportError};

fn main() -> Result<(), ReportError> {
    let runner = parse_cli()?;
    runner.run()
}
