mod logger;
mod templates;

use graphql_codegen_config::load_config;
use graphql_codegen_core::hooks::PreloadHook;
use graphql_codegen_core::pipeline::execute_with_options;

use crate::logger::configure_logging;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let config_path = std::env::var("CODEGEN_CONFIG_FILE_PATH")
        .ok()
        .or_else(|| std::env::args().nth(1));

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            return 1;
        }
    };
    configure_logging(&config.log, config.silent);

    let template = match templates::by_name(&config.template) {
        Ok(template) => template,
        Err(error) => {
            tracing::error!("{}", error);
            return 1;
        }
    };

    // No pre-load hooks ship with the CLI; `require` names would be bound
    // to registered implementations here.
    let hooks: Vec<Box<dyn PreloadHook>> = Vec::new();
    for name in &config.require {
        tracing::warn!(hook = name.as_str(), "no registered pre-load hook with this name");
    }

    match execute_with_options(&config, template.as_ref(), &hooks) {
        Ok(files) => {
            for file in files {
                tracing::info!(filename = file.filename.as_str(), "generated");
                print!("{}", file.content);
            }
            0
        }
        Err(error) => {
            for line in error.diagnostics() {
                tracing::error!("{}", line);
            }
            1
        }
    }
}
