use log::{error, info};
use printssx::{errorf, printf, printline, LogSink, Noise, PrinterConfig, SimpleLogger, StdoutSink};
use std::env;
use std::process;

fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("printssx-demo")
}

fn main() {
    let mut args: Vec<String> = env::args().collect();

    // Check for verbosity and routing flags
    let verbose = args.contains(&"--verbose".to_string());
    let quiet = args.contains(&"--quiet".to_string());
    let via_log = args.contains(&"--log".to_string());
    args.retain(|x| x != "--verbose" && x != "--quiet" && x != "--log");

    if args.len() < 2 {
        eprintln!(
            "Usage: {} [--verbose|--quiet] [--log] <message...>",
            program_name(&args)
        );
        eprintln!("Options:");
        eprintln!("  --verbose    Print at every noise level");
        eprintln!("  --quiet      Print only quiet messages");
        eprintln!("  --log        Route output through the log facade");
        eprintln!("Environment variables:");
        eprintln!("  PRINTSSX_HEADER=printssx   - Outermost header");
        eprintln!("  PRINTSSX_VERBOSE=moderate  - Threshold (quiet|subtle|moderate|loud|0-3)");
        eprintln!("  PRINTSSX_LOG_LEVEL=quiet   - Stored log level");
        process::exit(1);
    }

    let mut config = PrinterConfig::from_env();
    if verbose {
        config = config.with_verbose_level(Noise::Loud);
    } else if quiet {
        config = config.with_verbose_level(Noise::Quiet);
    }

    let mut printer = if via_log {
        if let Err(e) = SimpleLogger::init_for(Noise::Loud) {
            eprintln!("Failed to install logger: {}", e);
            process::exit(1);
        }
        info!("Routing printer output through the log facade");
        config.build(LogSink::new(log::Level::Info, config.header.clone()))
    } else {
        config.build(StdoutSink)
    };

    let message = args[1..].join(" ");
    info!(
        "Printing '{}' with threshold {}",
        message,
        printer.verbose_level()
    );

    {
        let mut demo = printer.scoped_header("demo");
        for level in Noise::ALL {
            let scope = demo.scoped_header(level.name());
            printf!(scope, level, "{}", message);
            printline!(scope, level, "words:", args.len() - 1);
        }
    }

    let err = errorf!(printer, "finished at depth {}", printer.depth());
    if via_log {
        error!("{}", err);
    } else {
        eprintln!("{}", err);
    }
}
