use std::process::ExitCode;

use rapport::{Rapport, RapportError, ReportKind};
use rapport_demos::common::{get_catalog, get_lookups, init_tracing};
use rapport_demos::render::{heading, local_price_line, price_line, usage};

async fn run(kind: ReportKind) -> Result<(), RapportError> {
    let rapport = Rapport::builder().catalog(get_catalog()?).build()?;

    println!("{}", heading(&kind));
    if kind.needs_currency() {
        let (countries, rates) = get_lookups()?;
        let report = rapport
            .current_products_with_local_price(countries, rates)
            .await?;
        for line in &report {
            println!("{}", local_price_line(line));
        }
    } else {
        let report = rapport.price_report(kind).await?;
        for line in &report {
            println!("{}", price_line(line));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let kind = match ReportKind::from_args(&args) {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{e}");
            eprint!("{}", usage());
            return ExitCode::from(2);
        }
    };

    match run(kind).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
