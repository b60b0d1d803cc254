use std::fs::OpenOptions;
use std::io::{Read as _, Write as _};
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use crate::cli::{ConfigArgs, IoArgs, SlugifyArgs, StripJsonLdArgs};
use crate::config::Config;
use crate::headings::{IdPolicy, inject_ids_with};

pub fn load_config(args: &ConfigArgs) -> anyhow::Result<Config> {
    let mut config = Config::from_env().context("load config from environment")?;
    if let Some(class) = args.table_wrapper_class.as_deref()
        && !class.trim().is_empty()
    {
        config.table_wrapper_class = class.trim().to_owned();
    }
    if args.unique_ids {
        config.id_policy = IdPolicy::Unique;
    }
    tracing::debug!(?config, "loaded config");
    Ok(config)
}

pub fn slugify(args: SlugifyArgs) -> anyhow::Result<()> {
    let slug = crate::slug::slugify(&args.text);
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{slug}").context("write slug")?;
    Ok(())
}

pub fn strip_json_ld(args: StripJsonLdArgs) -> anyhow::Result<()> {
    let html = read_input(args.io.input.as_deref())?;
    let split = crate::jsonld::split_content_and_json_ld(&html);
    if args.blocks {
        write_json(&args.io, &split)
    } else {
        write_output(&args.io, &split.cleaned_html)
    }
}

pub fn inject_ids(args: IoArgs, config: &Config) -> anyhow::Result<()> {
    let html = read_input(args.input.as_deref())?;
    write_output(&args, &inject_ids_with(&html, config.id_policy))
}

pub fn toc(args: IoArgs) -> anyhow::Result<()> {
    let html = read_input(args.input.as_deref())?;
    write_json(&args, &crate::toc::extract_toc(&html))
}

pub fn process(args: IoArgs, config: &Config) -> anyhow::Result<()> {
    let html = read_input(args.input.as_deref())?;
    let processed = crate::content::process_content_with(&html, config.id_policy);
    write_json(&args, &processed)
}

pub fn responsive(args: IoArgs, config: &Config) -> anyhow::Result<()> {
    let html = read_input(args.input.as_deref())?;
    let out = crate::responsive::make_responsive_with(&html, &config.responsive_options());
    write_output(&args, &out)
}

pub fn render(args: IoArgs, config: &Config) -> anyhow::Result<()> {
    let html = read_input(args.input.as_deref())?;
    let post = crate::content::render_post(&html, config);
    tracing::info!(
        toc_items = post.toc_items.len(),
        json_ld_blocks = post.json_ld_blocks.len(),
        "rendered post"
    );
    write_json(&args, &post)
}

fn read_input(input: Option<&str>) -> anyhow::Result<String> {
    match input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read input html: {path}"))
        }
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("read input html from stdin")?;
            Ok(html)
        }
    }
}

fn write_json<T: Serialize>(args: &IoArgs, value: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("serialize output json")?;
    json.push('\n');
    write_output(args, &json)
}

fn write_output(args: &IoArgs, contents: &str) -> anyhow::Result<()> {
    let Some(out) = args.out.as_deref() else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .context("write output to stdout")?;
        stdout.flush().context("flush stdout")?;
        return Ok(());
    };

    if let Some(parent) = Path::new(out).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if args.force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(out)
        .with_context(|| format!("open output: {out}"))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("write output: {out}"))?;
    Ok(())
}
