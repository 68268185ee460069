use clap::Parser;
use csvbook_convert::cli::{Args, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let c_directive = if args.verbose {
        "csvbook=debug"
    } else {
        "csvbook=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(c_directive.parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let report = run(&args)?;
    println!("{report}");
    for path in &report.files_out {
        println!("{}", path.display());
    }
    Ok(())
}
