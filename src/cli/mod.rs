//! Interactive terminal shell over the client SDK.
//!
//! Mirrors the command surface of the listing UI: sign in and out, page
//! through the collection, narrow it server-side (`find`) or locally
//! (`search`/`rooms`/`available`), inspect one apartment, and (behind the
//! access gate) create or remove a listing.

pub mod render;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::filter::ListFilter;
use crate::gate::{self, GateDecision};
use crate::model::{ApartmentDraft, ListQuery};
use crate::pager::ResourcePager;
use crate::refresh::RefreshScheduler;
use crate::session::SessionStore;
use crate::transport::{HttpTransport, Transport};

const HELP: &str = "\
Commands:
  login <email> [password]   sign in (prompts for the password if omitted)
  logout                     sign out
  whoami                     show the signed-in account
  list                       (re)load the current page
  find <text>                new listing narrowed server-side by <text>
  next | prev                page through the collection
  search <text> | search clear   local filter: substring on name/description
  rooms <n> | rooms clear        local filter: at least <n> rooms
  available on|off               local filter: only available listings
  show <slug>                fetch one apartment
  add                        create a listing (signed-in only)
  rm <slug>                  delete a listing (signed-in only)
  status                     connection, session and page position
  help                       this text
  quit | exit";

/// Run the interactive loop until EOF or `quit`. Blocking reads happen on
/// this thread; network calls run on the provided runtime, whose workers also
/// drive the background refresh task between commands.
pub fn run_shell(rt: &tokio::runtime::Runtime, config: &ClientConfig) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(config)?);
    let store = Arc::new(SessionStore::new(transport.clone() as Arc<dyn Transport>));

    // Held for the whole shell lifetime; dropping it on exit aborts the task.
    let _scheduler = {
        let _rt = rt.enter();
        RefreshScheduler::start(store.clone(), config.refresh_interval)
    };
    info!(target: "arenda::cli", "refresh scheduler armed ({}s)", config.refresh_interval.as_secs());

    let mut pager = ResourcePager::new(transport.clone() as Arc<dyn Transport>);
    let mut filter = ListFilter::default();

    println!("arenda apartment listings. Type 'help' for commands.");
    loop {
        let Some(line) = prompt_line("arenda> ")? else { break };
        if line.is_empty() {
            continue;
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line.as_str(), ""),
        };
        let command = head.to_lowercase();

        match command.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "login" => {
                let mut parts = rest.split_whitespace();
                let Some(email) = parts.next() else {
                    eprintln!("usage: login <email> [password]");
                    continue;
                };
                let password = match parts.next() {
                    Some(p) => p.to_string(),
                    None => match prompt_line("password: ")? {
                        Some(p) => p,
                        None => break,
                    },
                };
                match rt.block_on(store.login(email, &password)) {
                    Ok(()) => match store.identity() {
                        Some(identity) => println!("hello, {}", identity.display_name()),
                        None => eprintln!("signed in, but the session did not resolve"),
                    },
                    Err(ApiError::InvalidCredentials) => eprintln!("invalid email or password"),
                    Err(e) => eprintln!("could not sign in right now: {e}"),
                }
            }
            "logout" => {
                rt.block_on(store.logout());
                println!("signed out");
            }
            "whoami" => match gate::evaluate(&store.status()) {
                GateDecision::Pending => println!("session still resolving, try again"),
                GateDecision::SignIn => println!("not signed in"),
                GateDecision::Allow => {
                    if let Some(identity) = store.identity() {
                        render::print_identity(&identity);
                    }
                }
            },
            "list" => match rt.block_on(pager.load_current()) {
                Ok(()) => show_page(&pager, &filter),
                Err(e) => render::print_api_error(&e),
            },
            "find" => {
                let query = ListQuery {
                    search: (!rest.is_empty()).then(|| rest.to_string()),
                    ..Default::default()
                };
                pager = ResourcePager::with_query(transport.clone() as Arc<dyn Transport>, &query);
                match rt.block_on(pager.load_current()) {
                    Ok(()) => show_page(&pager, &filter),
                    Err(e) => render::print_api_error(&e),
                }
            }
            "next" => match rt.block_on(pager.advance()) {
                Ok(true) => show_page(&pager, &filter),
                Ok(false) => println!("no next page"),
                Err(e) => render::print_api_error(&e),
            },
            "prev" => match rt.block_on(pager.retreat()) {
                Ok(true) => show_page(&pager, &filter),
                Ok(false) => println!("no previous page"),
                Err(e) => render::print_api_error(&e),
            },
            "search" => {
                let mut criteria = filter.criteria().clone();
                criteria.text = (rest != "clear" && !rest.is_empty()).then(|| rest.to_string());
                filter.set_criteria(criteria);
                show_page(&pager, &filter);
            }
            "rooms" => {
                let mut criteria = filter.criteria().clone();
                if rest == "clear" {
                    criteria.min_rooms = None;
                } else {
                    match rest.parse() {
                        Ok(n) => criteria.min_rooms = Some(n),
                        Err(_) => {
                            eprintln!("usage: rooms <n> | rooms clear");
                            continue;
                        }
                    }
                }
                filter.set_criteria(criteria);
                show_page(&pager, &filter);
            }
            "available" => {
                let mut criteria = filter.criteria().clone();
                match rest {
                    "on" => criteria.available_only = true,
                    "off" => criteria.available_only = false,
                    _ => {
                        eprintln!("usage: available on|off");
                        continue;
                    }
                }
                filter.set_criteria(criteria);
                show_page(&pager, &filter);
            }
            "show" => {
                if rest.is_empty() {
                    eprintln!("usage: show <slug>");
                    continue;
                }
                match rt.block_on(transport.fetch_apartment(rest)) {
                    Ok(apartment) => render::print_detail(&apartment),
                    Err(e) => render::print_api_error(&e),
                }
            }
            "add" => {
                if !require_signed_in(&store) {
                    continue;
                }
                let Some(draft) = prompt_draft()? else { break };
                match rt.block_on(transport.create_apartment(&draft)) {
                    Ok(apartment) => println!("created '{}' as {}", apartment.name, apartment.slug),
                    Err(e) => render::print_api_error(&e),
                }
            }
            "rm" => {
                if !require_signed_in(&store) {
                    continue;
                }
                if rest.is_empty() {
                    eprintln!("usage: rm <slug>");
                    continue;
                }
                match rt.block_on(transport.delete_apartment(rest)) {
                    Ok(()) => println!("removed {rest}"),
                    Err(e) => render::print_api_error(&e),
                }
            }
            "status" => {
                println!("server: {}", transport.base_url());
                match gate::evaluate(&store.status()) {
                    GateDecision::Pending => println!("session: resolving"),
                    GateDecision::SignIn => println!("session: anonymous"),
                    GateDecision::Allow => match store.identity() {
                        Some(identity) => println!("session: {}", identity.email),
                        None => println!("session: anonymous"),
                    },
                }
                println!(
                    "page: {} at '{}' loaded={} prev={} next={}",
                    if pager.items().is_empty() { "empty" } else { "loaded" },
                    pager.current_locator(),
                    pager.items().len(),
                    pager.has_prev(),
                    pager.has_next(),
                );
                if !filter.criteria().is_empty() {
                    println!("local filter: {:?}", filter.criteria());
                }
            }
            other => eprintln!("unknown command: {other} (try 'help')"),
        }
    }
    Ok(())
}

/// Protected commands go through the access gate first.
fn require_signed_in(store: &SessionStore) -> bool {
    match gate::evaluate(&store.status()) {
        GateDecision::Allow => true,
        GateDecision::Pending => {
            eprintln!("session still resolving, try again in a moment");
            false
        }
        GateDecision::SignIn => {
            eprintln!("sign in first (login <email>)");
            false
        }
    }
}

/// Walk the create-form fields. `None` means EOF mid-form.
fn prompt_draft() -> Result<Option<ApartmentDraft>> {
    let fields = ["name", "description", "rooms", "price", "square"];
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(value) = prompt_line(&format!("{field}: "))? else { return Ok(None) };
        values.push(value);
    }
    let rooms = values[2].parse().unwrap_or(1);
    Ok(Some(ApartmentDraft {
        name: values[0].clone(),
        description: values[1].clone(),
        number_of_rooms: rooms,
        price: values[3].clone(),
        square: values[4].clone(),
        availability: None,
    }))
}

fn show_page(pager: &ResourcePager, filter: &ListFilter) {
    let visible = filter.apply(pager.items());
    render::print_apartments(&visible);
    let mut footer = format!("showing {} of {} loaded", visible.len(), pager.items().len());
    if pager.has_prev() {
        footer.push_str("  [prev]");
    }
    if pager.has_next() {
        footer.push_str("  [next]");
    }
    println!("{footer}");
}

fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
