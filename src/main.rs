use housing_loan::currency::CurrencyFormatter;
use housing_loan::profile::BorrowerProfile;
use housing_loan::report::HousingLoanReport;
use log::debug;
use simple_logger::SimpleLogger;

fn main() {
    // stdout carries the report, so keep the logger quiet
    if let Err(e) = SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
    {
        eprintln!("logger unavailable: {}", e);
    }

    let currency = CurrencyFormatter::detect();
    debug!("formatting amounts with {:?}", currency);

    let report = HousingLoanReport::new(BorrowerProfile::default());
    print!("{}", report.render(&currency));
}
