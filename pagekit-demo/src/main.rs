mod page;
mod paths;
mod settings;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};
use pagekit::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::settings::Settings;

#[tokio::main]
async fn main() {
    let log_file = File::create("pagekit-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(paths::settings_file);
    let settings = match settings_path {
        Some(path) => Settings::load(&path)?,
        None => {
            warn!("no config directory, using default widget settings");
            Settings::default()
        }
    };
    let defaults = settings.defaults();

    let doc = Document::new();
    page::install_styles(&doc)?;
    let host = page::build_faq(&doc)?;

    let faq = Collapsible::with_defaults(&doc, host, &defaults, &CollapsibleOptions::new())?;
    faq.on(EXPAND, |item: &CollapsibleSnapshot| info!("expanded question {}", item.index));
    faq.on(COLLAPSE, |item: &CollapsibleSnapshot| info!("collapsed question {}", item.index));

    // Clicking a title toggles it through the delegated listener.
    let first_title = faq.snapshot(0)?.title;
    doc.click(first_title)?;
    tokio::time::sleep(Duration::from_millis(400)).await;
    faq.expand(2).await?;
    println!("{}\n", doc.outer_markup(host));

    let dialog = Modal::with_defaults(&doc, &defaults, &page::confirm_reset())?;
    let reset = faq.clone();
    dialog.on("confirm", move |_: &ModalEvent| {
        if let Err(e) = reset.refresh(true) {
            warn!("failed to reset answers: {e}");
        }
    });
    dialog.on(pagekit::WILDCARD, |event: &ModalEvent| info!("dialog: {event}"));

    dialog.open().await?;
    println!("{}\n", doc.outer_markup(dialog.elements().root));

    let confirm = doc
        .query(dialog.elements().footer, r#"[data-type="confirm"]"#)?
        .ok_or("confirm action was not rendered")?;
    doc.click(confirm)?;
    tokio::time::sleep(Duration::from_millis(400)).await;

    println!("dialog: {:?}", dialog.state());
    println!("expanded: {:?}", faq.expanded_indexes());
    println!("{}", doc.outer_markup(doc.body()));

    dialog.destroy();
    faq.destroy();
    Ok(())
}
