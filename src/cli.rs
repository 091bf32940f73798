use crate::client::LandClient;
use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::resources;
use crate::tools::{self, DateRangeArg, SearchTendersArgs, TypeSearchArgs};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parses command-line arguments and executes the selected operation.
///
/// Every data subcommand prints the uniform JSON envelope produced by the
/// tool façade, so failures appear as `{"success": false, ...}` on stdout
/// rather than aborting the process.
///
/// # Errors
///
/// Returns an error only for problems outside the envelope contract:
/// malformed CLI values, an unreadable config file, or an unknown
/// resource name.
pub async fn cli() -> AppResult<()> {
    let cmd = build_command();

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let config = ResolvedConfig::from_toml_file(path)?;
            info!(path = %path.display(), "Loaded configuration file");
            config
        }
        None => ResolvedConfig::default(),
    };

    match matches.subcommand() {
        Some(("search", sub)) => {
            let args = search_args_from_matches(sub, config.page_size)?;
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::search_tenders(&client, &args).await)
        }
        Some(("details", sub)) => {
            let id = required_id(sub)?;
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::get_tender_details(&client, id).await)
        }
        Some(("map", sub)) => {
            let id = required_id(sub)?;
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::get_tender_map_details(&client, id).await)
        }
        Some(("active", sub)) => {
            let max_results = *sub.get_one::<usize>("max_results").unwrap_or(&100);
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::get_active_tenders(&client, max_results).await)
        }
        Some(("recent", sub)) => {
            let days = *sub.get_one::<i64>("days").unwrap_or(&30);
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::get_recent_results(&client, days).await)
        }
        Some(("by-type", sub)) => {
            let args = TypeSearchArgs {
                tender_types: sub
                    .get_one::<String>("types")
                    .map(|s| parse_id_list(s))
                    .transpose()?,
                purpose: sub.get_one::<String>("purpose").cloned(),
            };
            let client = LandClient::with_config(&config)?;
            print_envelope(&tools::search_by_type(&client, &args).await)
        }
        Some(("kod-yeshuv", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .expect("name is required");
            print_envelope(&tools::get_kod_yeshuv(name))
        }
        Some(("resources", sub)) => {
            let name = sub.get_one::<String>("name").expect("name is required");
            match resources::resource(name)? {
                Some(serialized) => println!("{serialized}"),
                None => {
                    return Err(AppError::InvalidInput(format!(
                        "Unknown resource '{name}'. Available: {}",
                        resources::RESOURCE_NAMES.join(", ")
                    )))
                }
            }
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn build_command() -> Command<'static> {
    Command::new("rami-cli")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a TOML config file (rate limit, timeout, retries, page size)")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("search")
                .about("Search land tenders with filters")
                .after_help("Dates use dd/mm/yy. Lists are comma-separated ids.\nExample:\n  rami-cli search --settlement \"תל אביב\" --statuses 1 --page-size 20")
                .arg(Arg::new("number").long("number").help("Tender number").action(ArgAction::Set))
                .arg(Arg::new("types").long("types").help("Tender type ids, e.g. 1,3").action(ArgAction::Set))
                .arg(Arg::new("settlement").long("settlement").help("Settlement name in Hebrew").action(ArgAction::Set))
                .arg(
                    Arg::new("kod_yeshuv")
                        .long("kod-yeshuv")
                        .help("Settlement code (overrides --settlement)")
                        .value_parser(clap::value_parser!(i64))
                        .action(ArgAction::Set),
                )
                .arg(Arg::new("neighborhood").long("neighborhood").help("Neighborhood name in Hebrew").action(ArgAction::Set))
                .arg(Arg::new("purposes").long("purposes").help("Tender purpose ids").action(ArgAction::Set))
                .arg(Arg::new("regions").long("regions").help("RAMI region ids").action(ArgAction::Set))
                .arg(Arg::new("statuses").long("statuses").help("Tender status ids").action(ArgAction::Set))
                .arg(Arg::new("populations").long("populations").help("Priority population ids").action(ArgAction::Set))
                .arg(Arg::new("submission_from").long("submission-from").help("Submission deadline from (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("submission_to").long("submission-to").help("Submission deadline to (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("publication_from").long("publication-from").help("Publication date from (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("publication_to").long("publication-to").help("Publication date to (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("committee_from").long("committee-from").help("Committee date from (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("committee_to").long("committee-to").help("Committee date to (dd/mm/yy)").action(ArgAction::Set))
                .arg(Arg::new("active_only").long("active-only").help("Only active tenders").action(ArgAction::SetTrue))
                .arg(Arg::new("quick_search").long("quick-search").help("Quick search mode").action(ArgAction::SetTrue))
                .arg(Arg::new("sort_by").long("sort-by").help("Upstream field to sort by, e.g. SgiraDate").action(ArgAction::Set))
                .arg(Arg::new("sort_order").long("sort-order").help("Sort direction: asc or desc").action(ArgAction::Set))
                .arg(
                    Arg::new("max_results")
                        .long("max-results")
                        .help("Maximum number of results to return")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("page_size")
                        .long("page-size")
                        .help("Results per page (client-side)")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("1-indexed page number (client-side)")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("details")
                .about("Get details for a tender by id")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("map")
                .about("Get geographic/mapping data for a tender by id")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("active")
                .about("List currently active tenders")
                .arg(
                    Arg::new("max_results")
                        .long("max-results")
                        .help("Maximum number of results to return")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("recent")
                .about("List tenders with results from recent days")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .help("Number of days to look back")
                        .value_parser(clap::value_parser!(i64))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("by-type")
                .about("Search tenders by type or land use purpose")
                .arg(Arg::new("types").long("types").help("Tender type ids, e.g. 1,3").action(ArgAction::Set))
                .arg(Arg::new("purpose").long("purpose").help("Land use purpose text").action(ArgAction::Set)),
        )
        .subcommand(
            Command::new("kod-yeshuv")
                .about("Look up the settlement code for a Hebrew name")
                .arg(Arg::new("name").help("Settlement name in Hebrew").required(true)),
        )
        .subcommand(
            Command::new("resources")
                .about("Print a reference data catalog as JSON")
                .arg(
                    Arg::new("name")
                        .help("Catalog name, e.g. tender-types, settlements, server-info")
                        .required(true),
                ),
        )
}

fn id_arg() -> Arg<'static> {
    Arg::new("id")
        .help("Tender id (michraz id)")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn required_id(sub: &ArgMatches) -> AppResult<i64> {
    Ok(*sub.get_one::<i64>("id").expect("id is required"))
}

fn search_args_from_matches(
    sub: &ArgMatches,
    default_page_size: usize,
) -> AppResult<SearchTendersArgs> {
    let get = |name: &str| sub.get_one::<String>(name).cloned();
    let get_list = |name: &str| -> AppResult<Option<Vec<i64>>> {
        sub.get_one::<String>(name).map(|s| parse_id_list(s)).transpose()
    };

    let mut args = SearchTendersArgs {
        tender_number: get("number"),
        tender_types: get_list("types")?,
        settlement: get("settlement"),
        kod_yeshuv: sub.get_one::<i64>("kod_yeshuv").copied(),
        neighborhood: get("neighborhood"),
        tender_purposes: get_list("purposes")?,
        regions: get_list("regions")?,
        tender_statuses: get_list("statuses")?,
        priority_populations: get_list("populations")?,
        submission_deadline: date_range_arg(sub, "submission_from", "submission_to"),
        publication_date: date_range_arg(sub, "publication_from", "publication_to"),
        committee_date: date_range_arg(sub, "committee_from", "committee_to"),
        active_only: sub.get_flag("active_only"),
        quick_search: sub.get_flag("quick_search"),
        sort_by: get("sort_by"),
        sort_order: get("sort_order"),
        page_size: default_page_size,
        ..SearchTendersArgs::default()
    };
    if let Some(&max_results) = sub.get_one::<usize>("max_results") {
        args.max_results = max_results;
    }
    if let Some(&page_size) = sub.get_one::<usize>("page_size") {
        args.page_size = page_size;
    }
    if let Some(&page) = sub.get_one::<usize>("page") {
        args.page_number = page;
    }
    Ok(args)
}

fn date_range_arg(sub: &ArgMatches, from: &str, to: &str) -> Option<DateRangeArg> {
    let from_date = sub.get_one::<String>(from).cloned();
    let to_date = sub.get_one::<String>(to).cloned();
    if from_date.is_none() && to_date.is_none() {
        return None;
    }
    Some(DateRangeArg { from_date, to_date })
}

/// Parses a comma-separated id list such as `1,3,9`.
fn parse_id_list(value: &str) -> AppResult<Vec<i64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::InvalidInput(format!("'{part}' is not a numeric id")))
        })
        .collect()
}

fn print_envelope(envelope: &Value) {
    match serde_json::to_string_pretty(envelope) {
        Ok(serialized) => println!("{serialized}"),
        Err(_) => println!("{envelope}"),
    }
}
