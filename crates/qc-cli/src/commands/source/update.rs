use anyhow::Context;
use qc_db::updates::source::{SourceUpdate, SourceUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{SourceEditArgs, SourceField};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &SourceEditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let update = build_update(args)?;
    let source = ctx
        .service
        .update_source(args.number, update)
        .await
        .with_context(|| format!("failed to update source {}", args.number))?;
    output(&source, flags.format)
}

fn build_update(args: &SourceEditArgs) -> anyhow::Result<SourceUpdate> {
    let mut builder = SourceUpdateBuilder::new();
    if let Some(name) = &args.name {
        builder = builder.source_name(name.as_str());
    }

    // A field both set and cleared is ambiguous.
    let set_or_clear = |value: &Option<String>, field: SourceField| -> anyhow::Result<Option<Option<String>>> {
        let cleared = args.clear.contains(&field);
        match (value, cleared) {
            (Some(_), true) => anyhow::bail!("--clear {field:?} conflicts with a new value for it"),
            (Some(v), false) => Ok(Some(Some(v.clone()))),
            (None, true) => Ok(Some(None)),
            (None, false) => Ok(None),
        }
    };

    if let Some(v) = set_or_clear(&args.author, SourceField::Author)? {
        builder = builder.author(v);
    }
    if let Some(v) = set_or_clear(&args.publication_title, SourceField::PublicationTitle)? {
        builder = builder.publication_title(v);
    }
    if let Some(v) = set_or_clear(&args.source_type, SourceField::SourceType)? {
        builder = builder.source_type(v);
    }
    if let Some(v) = set_or_clear(&args.search_type, SourceField::SearchType)? {
        builder = builder.search_type(v);
    }
    if let Some(v) = set_or_clear(&args.url, SourceField::Url)? {
        builder = builder.url(v);
    }

    let update = builder.build();
    if update.is_empty() {
        anyhow::bail!("nothing to update: pass a field flag or --clear");
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(number: i64) -> SourceEditArgs {
        SourceEditArgs {
            number,
            name: None,
            author: None,
            publication_title: None,
            source_type: None,
            search_type: None,
            url: None,
            clear: Vec::new(),
        }
    }

    #[test]
    fn sets_and_clears_fields() {
        let update = build_update(&SourceEditArgs {
            name: Some("Memo".into()),
            clear: vec![SourceField::Url],
            ..args(3)
        })
        .unwrap();
        assert_eq!(update.source_name.as_deref(), Some("Memo"));
        assert_eq!(update.url, Some(None));
        assert_eq!(update.author, None);
    }

    #[test]
    fn empty_edit_is_rejected() {
        assert!(build_update(&args(3)).is_err());
    }

    #[test]
    fn set_and_clear_of_same_field_conflicts() {
        let err = build_update(&SourceEditArgs {
            url: Some("https://example.org".into()),
            clear: vec![SourceField::Url],
            ..args(3)
        })
        .unwrap_err();
        assert!(err.to_string().contains("conflicts"));
    }
}
