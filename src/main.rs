use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use wikilinks::{DefaultLinkParser, DocumentParser, Link, LinkParser, RenamePageReplaceLinkHandler};

#[derive(Debug, clap::Parser)]
#[command(version, about = "Inspect and rewrite the links of XWiki 1.0 documents")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// List the valid and invalid links of a document as JSON.
    Links {
        /// Document to read, `-` for stdin.
        input_file: PathBuf,
        /// Space the document belongs to, used to resolve relative links.
        #[arg(long, env = "WIKILINKS_SPACE", default_value = "Main")]
        space: String,
    },
    /// Point every link to one page at another page.
    Rename {
        /// Document to read, `-` for stdin.
        input_file: PathBuf,
        /// Old page, in link syntax (e.g. `Main.OldPage` or `xwiki:Main.OldPage`).
        #[arg(long)]
        from: String,
        /// New page, in link syntax.
        #[arg(long)]
        to: String,
        #[arg(long, env = "WIKILINKS_SPACE", default_value = "Main")]
        space: String,
        /// Overwrite the input file instead of printing the result.
        #[arg(long)]
        in_place: bool,
    },
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn parse_reference(text: &str) -> anyhow::Result<Link> {
    let link = DefaultLinkParser
        .parse(text)
        .with_context(|| format!("invalid page reference `{text}`"))?;
    if link.is_external() {
        bail!("`{text}` is not a wiki page");
    }
    Ok(link)
}

fn links_json(content: &str, space: &str) -> serde_json::Value {
    let results = DocumentParser::new().parse_links(content);

    let valid: Vec<_> = results
        .valid_elements()
        .iter()
        .map(|link| {
            let normalized = link.normalized(space);
            json!({
                "link": link.to_string(),
                "external": link.is_external(),
                "space": normalized.space.as_deref(),
                "page": normalized.page.as_deref(),
            })
        })
        .collect();
    json!({
        "valid": valid,
        "invalid": results.invalid_elements(),
    })
}

fn list_links(input_file: &Path, space: &str) -> anyhow::Result<()> {
    let content = read_input(input_file)?;
    println!("{}", links_json(&content, space));
    Ok(())
}

/// Returns the rewritten document, which has already been written back when
/// `in_place` is set.
fn rename_links(
    input_file: &Path,
    from: &str,
    to: &str,
    space: &str,
    in_place: bool,
) -> anyhow::Result<String> {
    let link_to_look_for = parse_reference(from)?;
    let new_link = parse_reference(to)?;
    if in_place && input_file == Path::new("-") {
        bail!("--in-place needs a file, not stdin");
    }

    let content = read_input(input_file)?;
    let results = DocumentParser::new().parse_links_and_replace(
        &content,
        &link_to_look_for,
        &new_link,
        &RenamePageReplaceLinkHandler,
        space,
    );
    tracing::info!(
        replaced = results.replaced_elements().len(),
        invalid = results.invalid_elements().len(),
        "renamed {from} to {to}"
    );
    for text in results.invalid_elements() {
        tracing::warn!(message = "Skipped invalid link", text = text.as_str());
    }

    let modified_content = results.into_modified_content();
    if in_place {
        fs::write(input_file, &modified_content)
            .with_context(|| format!("failed to write {}", input_file.display()))?;
    }
    Ok(modified_content)
}

fn rename(
    input_file: &Path,
    from: &str,
    to: &str,
    space: &str,
    in_place: bool,
) -> anyhow::Result<()> {
    let modified_content = rename_links(input_file, from, to, space, in_place)?;
    if !in_place {
        print!("{modified_content}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CommandLine::parse();

    match args.command {
        Command::Links { input_file, space } => list_links(&input_file, &space),
        Command::Rename {
            input_file,
            from,
            to,
            space,
            in_place,
        } => rename(&input_file, &from, &to, &space, in_place),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOCUMENT: &str = "See [HelloWorld], [Docs|Sandbox.Guide#intro] and [https://www.xwiki.org/].
Broken: [x@@]
";

    #[test]
    fn test_links_json() {
        let output = links_json(DOCUMENT, "Main");

        assert_eq!(
            output,
            json!({
                "valid": [
                    {
                        "link": "HelloWorld",
                        "external": false,
                        "space": "Main",
                        "page": "HelloWorld",
                    },
                    {
                        "link": "Docs|Sandbox.Guide#intro",
                        "external": false,
                        "space": "Sandbox",
                        "page": "Guide",
                    },
                    {
                        "link": "https://www.xwiki.org/",
                        "external": true,
                        "space": null,
                        "page": null,
                    },
                ],
                "invalid": ["x@@"],
            })
        );
    }

    #[test]
    fn test_list_links_reads_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.xwiki");
        fs::write(&path, DOCUMENT).unwrap();

        list_links(&path, "Main").unwrap();
        assert!(list_links(&temp_dir.path().join("missing.xwiki"), "Main").is_err());
    }

    #[test]
    fn test_rename_prints_without_touching_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.xwiki");
        fs::write(&path, DOCUMENT).unwrap();

        let modified =
            rename_links(&path, "Main.HelloWorld", "Main.GoodbyeWorld", "Main", false).unwrap();

        assert!(modified.starts_with("See [GoodbyeWorld], "));
        assert_eq!(fs::read_to_string(&path).unwrap(), DOCUMENT);
    }

    #[test]
    fn test_rename_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.xwiki");
        fs::write(&path, DOCUMENT).unwrap();

        rename(&path, "Sandbox.Guide", "Archive.Guide", "Main", true).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            DOCUMENT.replace("Sandbox.Guide", "Archive.Guide")
        );
    }

    #[test]
    fn test_rename_in_place_needs_a_file() {
        let error =
            rename(Path::new("-"), "HelloWorld", "GoodbyeWorld", "Main", true).unwrap_err();
        assert!(error.to_string().contains("--in-place"));
    }

    #[test]
    fn test_rename_rejects_external_references() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.xwiki");
        fs::write(&path, DOCUMENT).unwrap();

        for (from, to) in [
            ("https://www.xwiki.org/", "GoodbyeWorld"),
            ("HelloWorld", "Page@wikipedia"),
            ("HelloWorld", "@@"),
        ] {
            assert!(rename_links(&path, from, to, "Main", false).is_err());
        }
    }

    #[test]
    fn test_command_line() {
        let args = CommandLine::try_parse_from([
            "wikilinks",
            "rename",
            "page.xwiki",
            "--from",
            "Old",
            "--to",
            "New",
            "--in-place",
        ])
        .unwrap();

        match args.command {
            Command::Rename {
                input_file,
                from,
                to,
                space,
                in_place,
            } => {
                assert_eq!(input_file, PathBuf::from("page.xwiki"));
                assert_eq!((from.as_str(), to.as_str()), ("Old", "New"));
                assert_eq!(space, "Main");
                assert!(in_place);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
