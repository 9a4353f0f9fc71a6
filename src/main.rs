use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    rowsample::app::run_sample_prep(std::env::args().skip(1))
}
