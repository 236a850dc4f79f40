// Entry point and high-level CLI flow.
//
// The binary is a console front end for the property pipeline:
// - Option [1] loads the CSV, repairs the encoding and classifies each row.
// - Options [2]-[5] inspect and filter the loaded collection.
// - Options [6]-[7] export the filtered set to CSV/JSON files.
//
// The loaded collection is an immutable snapshot: filtering and statistics
// only ever borrow it, and a reload replaces it wholesale.
mod classify;
mod encoding;
mod export;
mod filter;
mod loader;
mod stats;
mod types;
mod util;

use filter::Dimension;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{CategoryCountRow, FilterSpec, Property, PropertyType, Status, StreetRankingRow, Zone};

// Simple in-memory app state so we only load the CSV once but can query and
// export repeatedly in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        filters: FilterSpec::default(),
    })
});

struct AppState {
    data: Option<Vec<Property>>,
    filters: FilterSpec,
}

/// Read a single line of input after printing a prompt.
fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Take a snapshot of the loaded data and current filters, or complain if
/// nothing is loaded yet.
fn current_view() -> Option<(Vec<Property>, FilterSpec)> {
    let state = APP_STATE.lock().unwrap();
    match &state.data {
        Some(data) => Some((data.clone(), state.filters.clone())),
        None => {
            println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
            None
        }
    }
}

/// Handle option [1]: load, repair and classify the CSV file.
fn handle_load() {
    match loader::load(loader::SOURCE_PATH) {
        Ok(data) => {
            println!(
                "Processing dataset... ({} properties loaded)\n",
                util::format_int(data.len())
            );
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn category_rows<'a, I>(counts: I, total: usize) -> Vec<CategoryCountRow>
where
    I: IntoIterator<Item = (String, usize)>,
{
    counts
        .into_iter()
        .map(|(category, count)| CategoryCountRow {
            category,
            count: util::format_int(count),
            percent: util::format_number(stats::percentage(count, total), 1),
        })
        .collect()
}

/// Handle option [2]: aggregate the filtered collection and print the
/// statistics panel.
fn handle_statistics() {
    let Some((data, filters)) = current_view() else {
        return;
    };
    let filtered = filter::apply(&data, &filters);
    let s = stats::aggregate(&filtered);

    if filters.is_empty() {
        println!("Statistics over all {} properties\n", util::format_int(s.total));
    } else {
        println!(
            "Statistics over {} of {} properties (filters active)\n",
            util::format_int(s.total),
            util::format_int(data.len())
        );
    }

    println!("By type:");
    export::preview_table(
        &category_rows(
            PropertyType::ALL
                .iter()
                .map(|t| (t.to_string(), s.by_type.get(t).copied().unwrap_or(0))),
            s.total,
        ),
        PropertyType::ALL.len(),
    );
    println!("By zone:");
    export::preview_table(
        &category_rows(
            Zone::ALL
                .iter()
                .map(|z| (z.to_string(), s.by_zone.get(z).copied().unwrap_or(0))),
            s.total,
        ),
        Zone::ALL.len(),
    );
    println!("By status:");
    export::preview_table(
        &category_rows(
            Status::ALL
                .iter()
                .map(|st| (st.to_string(), s.by_status.get(st).copied().unwrap_or(0))),
            s.total,
        ),
        Status::ALL.len(),
    );

    println!("Top streets:");
    let ranking: Vec<StreetRankingRow> = s
        .top_streets
        .iter()
        .enumerate()
        .map(|(i, sc)| StreetRankingRow {
            rank: i + 1,
            street: sc.street.clone(),
            count: util::format_int(sc.count),
        })
        .collect();
    export::preview_table(&ranking, ranking.len());
}

fn parse_label_list<T: Copy + std::fmt::Display>(input: &str, all: &[T]) -> Vec<T> {
    let mut picked = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match all
            .iter()
            .find(|v| v.to_string().to_lowercase() == part.to_lowercase())
        {
            Some(v) => picked.push(*v),
            None => println!("Ignoring unrecognized value: {}", part),
        }
    }
    picked
}

fn optional(input: String) -> Option<String> {
    if input.is_empty() || input == filter::ALL_SENTINEL {
        None
    } else {
        Some(input)
    }
}

/// Handle option [3]: prompt for each filter dimension. Blank (or "Todos")
/// leaves a dimension unconstrained.
fn handle_set_filters() {
    let Some((data, filters)) = current_view() else {
        return;
    };

    let process_number = optional(prompt("Process number contains (blank = all): "));
    let notice_id = optional(prompt("Notice id contains (blank = all): "));

    // Street is picked from the cross-filtered option list so the user can
    // only select something that still exists under the other filters.
    let draft = FilterSpec {
        process_number: process_number.clone(),
        notice_id: notice_id.clone(),
        ..filters.clone()
    };
    let streets = filter::options_for(Dimension::Street, &data, &draft);
    println!("{} streets available.", util::format_int(streets.len()));
    let street = optional(prompt("Street (exact name, blank = all): "));

    let types = parse_label_list(
        &prompt("Types (comma-separated: Casa, Construção, Prédio, Terreno; blank = all): "),
        &PropertyType::ALL,
    );
    let zones = parse_label_list(
        &prompt("Zones (comma-separated: Norte, Sul, Leste, Oeste; blank = all): "),
        &Zone::ALL,
    );
    let statuses = parse_label_list(
        &prompt("Statuses (comma-separated: Abandonado, Em análise, Regularizado; blank = all): "),
        &Status::ALL,
    );

    let spec = FilterSpec {
        process_number,
        notice_id,
        street,
        types,
        zones,
        statuses,
    };
    let matched = filter::apply(&data, &spec).len();
    println!("Filters set. {} properties match.\n", util::format_int(matched));
    APP_STATE.lock().unwrap().filters = spec;
}

/// Handle option [4]: reset every filter dimension.
fn handle_clear_filters() {
    let mut state = APP_STATE.lock().unwrap();
    state.filters = FilterSpec::default();
    println!("Filters cleared.\n");
}

/// Handle option [5]: list the street options that remain available under
/// the other active filters, optionally narrowed by a text search.
fn handle_list_streets() {
    let Some((data, filters)) = current_view() else {
        return;
    };
    let options = filter::options_for(Dimension::Street, &data, &filters);
    let query = prompt("Search streets (blank = all): ");
    let shown = filter::search_options(&options, &query);
    println!(
        "{} of {} streets:",
        util::format_int(shown.len()),
        util::format_int(options.len())
    );
    for street in &shown {
        println!("  {}", street);
    }
    println!();
}

/// Handle options [6] and [7]: export the filtered collection.
fn handle_export(format: &str) {
    let Some((data, filters)) = current_view() else {
        return;
    };
    let filtered = filter::apply(&data, &filters);
    let file = export::dated_filename(format);
    let result = match format {
        "csv" => export::write_csv(&file, &filtered),
        _ => export::write_json(&file, &filtered),
    };
    match result {
        Ok(()) => println!(
            "Exported {} properties to {}\n",
            util::format_int(filtered.len()),
            file
        ),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() {
    pretty_env_logger::init();
    loop {
        println!("Centro Abandoned Properties Dashboard");
        println!("[1] Load the dataset");
        println!("[2] Show statistics");
        println!("[3] Set filters");
        println!("[4] Clear filters");
        println!("[5] List street options");
        println!("[6] Export filtered CSV");
        println!("[7] Export filtered JSON");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => handle_statistics(),
            "3" => handle_set_filters(),
            "4" => handle_clear_filters(),
            "5" => handle_list_streets(),
            "6" => handle_export("csv"),
            "7" => handle_export("json"),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0-7.\n");
            }
        }
    }
}
