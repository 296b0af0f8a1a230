// Entry point and high-level CLI flow.
//
// - Option [1] loads and cleans the delivery CSV, printing diagnostics.
// - Option [2] asks for a squad and a year, runs the full dashboard
//   pipeline, and writes the response as JSON plus a flat CSV.
// - After generating a dashboard, the user can choose to go back to the
//   selection menu or exit.
mod error;
mod filter;
mod loader;
mod mapping;
mod output;
mod tables;
mod types;
mod util;

use error::DashboardError;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{ErrorResponse, Record};

const CSV_PATH: &str = "bh_jan25_dez25.csv";

// Simple in-memory app state so we only load/clean the CSV once but can
// generate dashboards for several squads in a single run. The record set is
// read-only after loading; each request works on its own filtered copy.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<Record>>,
}

/// Print a prompt and read a single trimmed line of input.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the selection menu after generating
/// a dashboard.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and clean the CSV file.
///
/// On success, we store the `Vec<Record>` in `APP_STATE` and print a short
/// textual summary of what happened.
fn handle_load() {
    match loader::load_records(CSV_PATH) {
        Ok((data, load_report)) => {
            println!(
                "Processing dataset... ({} rows read, {} records loaded)",
                util::format_int(load_report.total_rows as i64),
                util::format_int(load_report.parsed_rows as i64)
            );
            if load_report.skipped_rows > 0 {
                println!(
                    "Note: {} rows skipped due to missing year/month/briefing.",
                    util::format_int(load_report.skipped_rows as i64)
                );
            }
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: generate the dashboard for a prompted squad and year.
///
/// This function is intentionally side-effectful:
/// - writes the dashboard rows to `dashboard.csv`,
/// - writes the full response object to `dashboard.json`,
/// - and prints a preview of the first rows to the console.
fn handle_generate_dashboard() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    let squad = read_line("Squad: ");
    let ano = read_line("Ano: ");
    let year = util::parse_i32_safe(Some(ano.as_str()));

    let result = match (squad.is_empty(), year) {
        (false, Some(year)) => tables::generate_dashboard(&data, &squad, year),
        _ => Err(DashboardError::MissingParameter),
    };

    match result {
        Ok(response) => {
            println!("\nGenerating dashboard for squad '{}' in {}...", response.squad, response.ano);
            println!(
                "{} records processed, {} briefings, {} deliveries.\n",
                util::format_int(response.linhas_processadas as i64),
                util::format_int(response.total_briefings as i64),
                util::format_int(response.total_entregas)
            );
            if let Err(e) = output::write_csv("dashboard.csv", &response.dashboard) {
                eprintln!("Write error: {}", e);
            }
            if let Err(e) = output::write_json("dashboard.json", &response) {
                eprintln!("Write error: {}", e);
            }
            output::preview_rows(&response.dashboard, 8);
            println!("(Full dashboard exported to dashboard.csv and dashboard.json)\n");
        }
        Err(e) => {
            let body = ErrorResponse::from_error(&e);
            match serde_json::to_string_pretty(&body) {
                Ok(json) => eprintln!("{}\n", json),
                Err(_) => eprintln!("Error: {}\n", e),
            }
        }
    }
}

fn main() {
    loop {
        println!("Select an option:");
        println!("[1] Load the file");
        println!("[2] Generate Dashboard\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                handle_generate_dashboard();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
