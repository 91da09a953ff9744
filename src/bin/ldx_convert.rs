//! Copyright © 2025-2026 The Ldx Authors. All Rights Reserved.
//!
//! This file is part of Ldx.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Command-line entry point: assembles a pipeline from the arguments and
//! drives it to completion.
//!
//! Usage:
//!
//! ```text
//! ldx-convert [global options] READER [options] [FILTER [options] ...] [WRITER [options]]
//! ```

use anyhow::Context;
use log::debug;

use ldx::args::LdxArgParser;
use ldx::execution::execute;
use ldx::io::LdxCompression;
use ldx::registry::{LdxPluginKind, LdxRegistry};
use ldx::session::{LdxOptions, LdxSession, DEFAULT_UPDATE_INTERVAL};

fn print_usage(registry: &LdxRegistry) {
    println!(
        "Converts LLM training datasets between formats.\n\
         \n\
         Usage: ldx-convert [global options] READER [options] [FILTER [options] ...] [WRITER [options]]\n\
         \n\
         Global options:\n\
         \x20 -h, --help              show this help and exit\n\
         \x20 -v, --verbose           verbose logging (repeat for debug output)\n\
         \x20 -b, --force-batch       drain the reader fully before filtering/writing\n\
         \x20 -c, --compression TYPE  compress outputs (gz)\n\
         \x20 -u, --update-interval N log progress every N records (default: {DEFAULT_UPDATE_INTERVAL})\n"
    );
    for (kind, heading) in [
        (LdxPluginKind::Reader, "Readers:"),
        (LdxPluginKind::Filter, "Filters:"),
        (LdxPluginKind::Writer, "Writers:"),
    ] {
        println!("{heading}");
        for (entry_kind, name, description) in registry.describe() {
            if entry_kind == kind {
                println!("  {name:<20} {description}");
            }
        }
        println!();
    }
}

fn main() -> anyhow::Result<()> {
    let registry = LdxRegistry::with_defaults();
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    if tokens.is_empty() || tokens.iter().any(|t| t == "-h" || t == "--help") {
        print_usage(&registry);
        return Ok(());
    }

    let (global, pipeline) = registry
        .assemble(&tokens)
        .context("failed to assemble the pipeline")?;

    let mut parser = LdxArgParser::new("global options", &global);
    let mut verbosity = 0;
    while parser.flag("-v", "--verbose") {
        verbosity += 1;
    }
    let mut options = LdxOptions::default();
    options.force_batch = parser.flag("-b", "--force-batch");
    options.compression = parser
        .parsed_value::<LdxCompression>("-c", "--compression")
        .context("invalid global options")?;
    if let Some(interval) = parser
        .parsed_value("-u", "--update-interval")
        .context("invalid global options")?
    {
        options.update_interval = interval;
    }
    parser.finish().context("invalid global options")?;

    env_logger::Builder::from_default_env()
        .filter_level(match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
    debug!("options: {options:?}");

    let session = LdxSession::new(options).into_shared();
    execute(pipeline, &session).context("pipeline failed")?;
    Ok(())
}
