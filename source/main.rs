use clap::Parser as _;

fn main() -> anyhow::Result<()> {
  let arguments = cidrset::cli::Cli::parse();

  let encoder = Box::new(log4rs::encode::pattern::PatternEncoder::new("{l} {t} - {m}{n}"));
  log4rs::init_config(
    log4rs::config::Config::builder()
      .appender(
        log4rs::config::Appender::builder()
          .filter(Box::new(log4rs::filter::threshold::ThresholdFilter::new(
            arguments.verbose.log_level_filter(),
          )))
          .build(
            "console",
            Box::new(
              log4rs::append::console::ConsoleAppender::builder()
                .encoder(encoder)
                .build(),
            ),
          ),
      )
      .build(
        log4rs::config::Root::builder()
          .appender("console")
          .build(log::LevelFilter::Trace),
      )?,
  )?;

  if let Err(error) = cidrset::cli::run(&arguments.command) {
    log::debug!("{error:#}");
    eprintln!("error: {error}");
    std::process::exit(1);
  }
  Ok(())
}
