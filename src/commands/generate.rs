//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(blog)?;
    let total = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s into {:?}",
        total,
        duration.as_secs_f64(),
        blog.public_dir
    );

    Ok(())
}

/// Watch content, messages and config, regenerating the whole site on change.
///
/// Blocks until the watcher channel closes.
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    debouncer
        .watcher()
        .watch(&blog.content_dir, RecursiveMode::Recursive)?;

    if blog.messages_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.messages_dir, RecursiveMode::Recursive)?;
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let Some(event) = events.first() else {
                    continue;
                };
                tracing::info!("{:?} changed, regenerating...", event.path);

                // Config edits can move directories or locales, so reload first
                let current = match Blog::new(&blog.base_dir) {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {:#}", e);
                        continue;
                    }
                };
                if let Err(e) = run(&current) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}
