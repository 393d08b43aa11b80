use serde::Serialize;

use qc_core::responses::{CodingWithCode, CodingWithSource};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{TableOptions, Tabular, output, views};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CodingListResponse {
    ByCode(Vec<CodingWithSource>),
    BySource(Vec<CodingWithCode>),
}

impl Tabular for CodingListResponse {
    fn to_table(&self, options: TableOptions) -> String {
        match self {
            Self::ByCode(codings) => views::rows(codings, options),
            Self::BySource(codings) => views::rows(codings, options),
        }
    }
}

pub async fn run(
    code: Option<i64>,
    source_number: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = usize::try_from(flags.limit_or(ctx.config.general.default_limit))?;

    let response = match (code, source_number) {
        (Some(code_id), _) => {
            let mut codings = ctx.service.list_codings_for_code(code_id).await?;
            codings.truncate(limit);
            CodingListResponse::ByCode(codings)
        }
        (None, Some(number)) => {
            let source = ctx.service.get_source_by_number(number).await?;
            let mut codings = ctx.service.list_codings_for_source(source.id).await?;
            codings.truncate(limit);
            CodingListResponse::BySource(codings)
        }
        (None, None) => anyhow::bail!("pass --code or --source"),
    };

    output(&response, flags.format)
}
