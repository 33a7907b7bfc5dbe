use anyhow::Result;
use clap::Parser;
use osti_doi_query::args::Args;
use osti_doi_query::run;

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    run(&args)?;
    Ok(())
}
