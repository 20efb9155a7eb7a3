//! Master index page listing every module page.

use super::helpdoc::{align, footer, page_header, rule};
use super::{IconTable, RenderContext, title_case};
use crate::types::{ModuleRecord, ModuleRegistry};

pub fn render(registry: &ModuleRegistry, ctx: &RenderContext, icons: &IconTable) -> String {
    let mut out = page_header(
        &ctx.index_file_name(),
        &format!("{} API Documentation", ctx.title),
        ctx,
    );

    out.push_str(&rule());
    out.push_str(&align("MODULES", &format!("*{}-modules*", ctx.name)));
    out.push_str("\n\n");

    if registry.is_empty() {
        out.push_str("No modules documented.\n");
    }
    for record in registry.modules() {
        out.push_str(&module_line(record, ctx, icons));
        out.push('\n');
    }
    out.push('\n');

    let names: Vec<&str> = registry.module_names().collect();
    out.push_str(&usage_line(&names, ctx));
    out.push_str("\n\n");

    out.push_str(&footer());
    out
}

/// `<icon> <Title>  |<file>|  functions: F  classes: C  variables: V`
pub fn module_line(record: &ModuleRecord, ctx: &RenderContext, icons: &IconTable) -> String {
    format!(
        "{} {}  |{}|  functions: {}  classes: {}  variables: {}",
        icons.icon(&record.name),
        title_case(&record.name),
        ctx.help_file_name(&record.name),
        record.functions.len(),
        record.classes.len(),
        record.variables.len()
    )
}

fn usage_line(names: &[&str], ctx: &RenderContext) -> String {
    let listed = if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    };
    format!("Modules: {}  (see :help {}-<module>)", listed, ctx.name)
}
