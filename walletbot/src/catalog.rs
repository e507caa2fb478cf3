//! Listing of models that support content generation.

use std::io::Write;

use futures_util::StreamExt;

use walletbot_types::models::Model;

use crate::backend::ModelCatalog;
use crate::error::Result;

const RULE_WIDTH: usize = 50;

/// 打印所有支持 `generateContent` 的模型，返回打印的条目数。
///
/// 目录为空或没有匹配项时只打印表头。枚举途中的远程错误直接返回，
/// 已打印的条目保留。
///
/// # Errors
/// 当远程请求失败或写出失败时返回错误。
pub async fn print_generation_models<C, W>(catalog: &C, output: &mut W) -> Result<usize>
where
    C: ModelCatalog + ?Sized,
    W: Write,
{
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(output, "Available models:")?;
    writeln!(output, "{rule}")?;

    let mut printed = 0;
    let mut seen = 0;
    let mut models = catalog.list_models();
    while let Some(model) = models.next().await {
        let model = model?;
        seen += 1;
        if !model.supports_generate_content() {
            continue;
        }
        write_model_block(output, &model)?;
        writeln!(output, "{rule}")?;
        printed += 1;
    }
    output.flush()?;

    tracing::debug!(seen, printed, "model catalog listed");
    Ok(printed)
}

fn write_model_block<W: Write>(output: &mut W, model: &Model) -> Result<()> {
    writeln!(output, "Name: {}", model.name)?;
    writeln!(output, "Display: {}", model.display_name)?;
    writeln!(
        output,
        "Methods: {}",
        model.supported_generation_methods.join(", ")
    )?;
    Ok(())
}
