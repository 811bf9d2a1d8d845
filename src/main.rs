use daily_weather::config::Config;
use daily_weather::logging::{self, init_logger};
use daily_weather::output::table::render_table;
use daily_weather::pipeline;

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", logging::failure_message("Loading configuration", &e));
            std::process::exit(1);
        }
    };

    init_logger(
        config.logging.level,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );

    let outcome = match pipeline::run(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            logging::log_failure("Daily average run", &e);
            std::process::exit(1);
        }
    };

    print!("{}", render_table(&outcome.rows, config.output.show_rows));

    println!(
        "\nDaily average weather data saved successfully to '{}' folder.",
        config.output.dir.display()
    );
}
