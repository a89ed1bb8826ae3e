//! Diagnostic-call scanning.
//!
//! Reports which diagnostic calls the production minifier will strip, using
//! the rules it applies. With console dropping on, every `console.*` call
//! becomes `undefined` wherever it sits, and side effects in its arguments go
//! with it; those sites are flagged so they can be moved out of the call.
//! Other declared-pure calls disappear only as whole statements with
//! side-effect free arguments, and are otherwise kept.

use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, CallExpression, DebuggerStatement, Expression,
    ExpressionStatement, ObjectPropertyKind, UnaryOperator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use serde::Serialize;
use shellpack_config::CompressionOptions;

use crate::error::{GraphError, Result};
use crate::vue::extract_vue_scripts;

/// What the minifier does with a diagnostic site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StripDisposition {
    /// Dropped from the output.
    Removed,
    /// Dropped from the output together with its arguments, whose side
    /// effects no longer happen.
    RemovedSideEffectsLost,
    /// Declared-pure call kept because an enclosing expression uses its value.
    RetainedNested,
    /// Declared-pure call kept because an argument has side effects of its own.
    RetainedSideEffects,
}

impl StripDisposition {
    pub fn is_removed(self) -> bool {
        matches!(self, Self::Removed | Self::RemovedSideEffectsLost)
    }

    /// Removal that changes what the program computes.
    pub fn loses_side_effects(self) -> bool {
        matches!(self, Self::RemovedSideEffectsLost)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Removed => "removed",
            Self::RemovedSideEffectsLost => "removed (argument side effects lost)",
            Self::RetainedNested => "retained (value used)",
            Self::RetainedSideEffects => "retained (side-effecting arguments)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SiteKind {
    Call,
    Debugger,
}

/// One diagnostic call or `debugger` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripSite {
    pub kind: SiteKind,
    /// Dotted callee path, or `debugger`.
    pub callee: String,
    /// 1-based.
    pub line: u32,
    /// 1-based, in characters.
    pub column: u32,
    pub disposition: StripDisposition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripReport {
    pub path: Option<PathBuf>,
    pub sites: Vec<StripSite>,
}

impl StripReport {
    pub fn removed(&self) -> impl Iterator<Item = &StripSite> {
        self.sites.iter().filter(|site| site.disposition.is_removed())
    }

    pub fn retained(&self) -> impl Iterator<Item = &StripSite> {
        self.sites.iter().filter(|site| !site.disposition.is_removed())
    }

    pub fn side_effects_lost(&self) -> impl Iterator<Item = &StripSite> {
        self.sites
            .iter()
            .filter(|site| site.disposition.loses_side_effects())
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Scans sources for diagnostic calls under a set of compression options.
#[derive(Debug, Clone)]
pub struct DiagnosticScanner {
    options: CompressionOptions,
}

impl DiagnosticScanner {
    pub fn new(options: CompressionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    /// Scan one JavaScript or TypeScript source.
    ///
    /// ```
    /// use oxc_span::SourceType;
    /// use shellpack_config::CompressionOptions;
    /// use shellpack_graph::{DiagnosticScanner, StripDisposition};
    ///
    /// let scanner = DiagnosticScanner::new(CompressionOptions::default());
    /// let report = scanner.scan_source("console.log('x');", SourceType::mjs()).unwrap();
    /// assert_eq!(report.sites[0].disposition, StripDisposition::Removed);
    /// ```
    pub fn scan_source(&self, source: &str, source_type: SourceType) -> Result<StripReport> {
        let sites = self.scan_fragment(source, source_type, Path::new("<source>"), 0)?;
        Ok(StripReport { path: None, sites })
    }

    /// Scan a file, picking the parser dialect from its extension. `.vue`
    /// files are scanned block by block with positions relative to the file.
    pub fn scan_file(&self, path: &Path) -> Result<StripReport> {
        let content = fs::read_to_string(path)?;

        let sites = if path.extension().is_some_and(|ext| ext == "vue") {
            let mut sites = Vec::new();
            for block in extract_vue_scripts(&content) {
                let source_type = block.source_type();
                let line_offset = line_column(&content, block.offset).0 - 1;
                sites.extend(self.scan_fragment(block.source, source_type, path, line_offset)?);
            }
            sites
        } else {
            let source_type = SourceType::from_path(path)
                .map_err(|_| GraphError::UnsupportedSource(path.to_path_buf()))?;
            self.scan_fragment(&content, source_type, path, 0)?
        };

        tracing::debug!(path = %path.display(), sites = sites.len(), "scanned source");
        Ok(StripReport {
            path: Some(path.to_path_buf()),
            sites,
        })
    }

    fn scan_fragment(
        &self,
        source: &str,
        source_type: SourceType,
        path: &Path,
        line_offset: u32,
    ) -> Result<Vec<StripSite>> {
        let allocator = Allocator::default();
        let ParserReturn {
            program,
            errors,
            panicked,
            ..
        } = Parser::new(&allocator, source, source_type).parse();

        if panicked || !errors.is_empty() {
            let message = errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "parser aborted".to_string());
            return Err(GraphError::Parse {
                path: path.to_path_buf(),
                message,
            });
        }

        let mut collector = SiteCollector {
            options: &self.options,
            source,
            line_offset,
            sites: Vec::new(),
        };
        collector.visit_program(&program);
        Ok(collector.sites)
    }
}

struct SiteCollector<'o, 's> {
    options: &'o CompressionOptions,
    source: &'s str,
    line_offset: u32,
    sites: Vec<StripSite>,
}

impl SiteCollector<'_, '_> {
    fn record(&mut self, kind: SiteKind, callee: String, offset: u32, disposition: StripDisposition) {
        let (line, column) = line_column(self.source, offset as usize);
        self.sites.push(StripSite {
            kind,
            callee,
            line: line + self.line_offset,
            column,
            disposition,
        });
    }

    fn marked_callee(&self, call: &CallExpression<'_>) -> Option<String> {
        callee_path(&call.callee).filter(|callee| self.options.marks_for_removal(callee))
    }

    /// Disposition of a call the minifier replaces outright.
    fn dropped(call: &CallExpression<'_>) -> StripDisposition {
        if call.arguments.iter().all(argument_is_pure) {
            StripDisposition::Removed
        } else {
            StripDisposition::RemovedSideEffectsLost
        }
    }
}

impl<'a> Visit<'a> for SiteCollector<'_, '_> {
    fn visit_expression_statement(&mut self, stmt: &ExpressionStatement<'a>) {
        if let Expression::CallExpression(call) = &stmt.expression {
            if let Some(callee) = self.marked_callee(call) {
                let disposition = if self.options.drops_unconditionally(&callee) {
                    Self::dropped(call)
                } else if call.arguments.iter().all(argument_is_pure) {
                    StripDisposition::Removed
                } else {
                    StripDisposition::RetainedSideEffects
                };
                self.record(SiteKind::Call, callee, call.span.start, disposition);

                // The callee is a plain path; only arguments can hold more sites.
                for argument in &call.arguments {
                    self.visit_argument(argument);
                }
                return;
            }
        }
        walk::walk_expression_statement(self, stmt);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some(callee) = self.marked_callee(call) {
            let disposition = if self.options.drops_unconditionally(&callee) {
                Self::dropped(call)
            } else {
                StripDisposition::RetainedNested
            };
            self.record(SiteKind::Call, callee, call.span.start, disposition);
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_debugger_statement(&mut self, stmt: &DebuggerStatement) {
        if self.options.drop_debugger {
            self.record(
                SiteKind::Debugger,
                "debugger".to_string(),
                stmt.span.start,
                StripDisposition::Removed,
            );
        }
    }
}

/// Dotted path of a callee such as `console.log` or `app.logger.debug`.
/// `None` for anything computed at runtime.
fn callee_path(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => {
            let object = callee_path(&member.object)?;
            Some(format!("{object}.{}", member.property.name))
        }
        Expression::ComputedMemberExpression(member) => match &member.expression {
            Expression::StringLiteral(property) => {
                let object = callee_path(&member.object)?;
                Some(format!("{object}.{}", property.value))
            }
            _ => None,
        },
        Expression::ParenthesizedExpression(inner) => callee_path(&inner.expression),
        _ => None,
    }
}

fn argument_is_pure(argument: &Argument<'_>) -> bool {
    match argument {
        Argument::SpreadElement(_) => false,
        _ => argument.as_expression().is_some_and(expression_is_pure),
    }
}

/// Whether evaluating `expr` cannot affect program state.
///
/// Property reads count as impure since they may run getters or throw.
fn expression_is_pure(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::RegExpLiteral(_)
        | Expression::Identifier(_)
        | Expression::ThisExpression(_)
        | Expression::FunctionExpression(_)
        | Expression::ArrowFunctionExpression(_) => true,
        Expression::TemplateLiteral(template) => template.expressions.iter().all(expression_is_pure),
        Expression::ArrayExpression(array) => array.elements.iter().all(|element| match element {
            ArrayExpressionElement::SpreadElement(_) => false,
            ArrayExpressionElement::Elision(_) => true,
            _ => element.as_expression().is_some_and(expression_is_pure),
        }),
        Expression::ObjectExpression(object) => {
            object.properties.iter().all(|property| match property {
                ObjectPropertyKind::ObjectProperty(property) => {
                    !property.computed && expression_is_pure(&property.value)
                }
                ObjectPropertyKind::SpreadProperty(_) => false,
            })
        }
        Expression::UnaryExpression(unary) => {
            unary.operator != UnaryOperator::Delete && expression_is_pure(&unary.argument)
        }
        Expression::BinaryExpression(binary) => {
            expression_is_pure(&binary.left) && expression_is_pure(&binary.right)
        }
        Expression::LogicalExpression(logical) => {
            expression_is_pure(&logical.left) && expression_is_pure(&logical.right)
        }
        Expression::ConditionalExpression(conditional) => {
            expression_is_pure(&conditional.test)
                && expression_is_pure(&conditional.consequent)
                && expression_is_pure(&conditional.alternate)
        }
        Expression::ParenthesizedExpression(inner) => expression_is_pure(&inner.expression),
        _ => false,
    }
}

/// 1-based line and character column of a byte offset.
fn line_column(source: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() as u32 + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<StripSite> {
        DiagnosticScanner::new(CompressionOptions::default())
            .scan_source(source, SourceType::mjs())
            .unwrap()
            .sites
    }

    fn dispositions(source: &str) -> Vec<(String, StripDisposition)> {
        scan(source)
            .into_iter()
            .map(|site| (site.callee, site.disposition))
            .collect()
    }

    #[test]
    fn statement_console_log_is_removed() {
        assert_eq!(
            dispositions(r#"console.log("x");"#),
            [("console.log".to_string(), StripDisposition::Removed)]
        );
    }

    #[test]
    fn user_defined_loggers_are_ignored() {
        let source = r#"
            function log(msg) { return msg; }
            const logger = { log };
            log("a");
            logger.log("b");
        "#;
        assert!(scan(source).is_empty());
    }

    #[test]
    fn declared_user_function_is_removed() {
        let options = CompressionOptions::with_pure_functions(["logger.log"]);
        let report = DiagnosticScanner::new(options)
            .scan_source(r#"logger.log("b");"#, SourceType::mjs())
            .unwrap();
        assert_eq!(report.removed().count(), 1);
    }

    #[test]
    fn console_calls_lose_argument_side_effects() {
        let source = r#"
            console.log(counter++);
            console.info(fetchUser());
            console.log(user.name);
            console.warn(...items);
        "#;
        let sites = dispositions(source);
        assert_eq!(sites.len(), 4);
        assert!(sites.iter().all(|(_, d)| *d == StripDisposition::RemovedSideEffectsLost));
        assert!(sites.iter().all(|(_, d)| d.is_removed()));
    }

    #[test]
    fn pure_arguments_are_removed() {
        let source = r#"
            console.log(`count: ${count}`, [1, 2], { id, ok: !done }, typeof x, a + b);
            console.info(() => expensive());
        "#;
        assert!(scan(source).iter().all(|s| s.disposition == StripDisposition::Removed));
    }

    #[test]
    fn nested_console_calls_are_removed() {
        let sites = dispositions("console.log(counter++); foo(console.info('b'));");
        assert_eq!(
            sites,
            [
                ("console.log".to_string(), StripDisposition::RemovedSideEffectsLost),
                ("console.info".to_string(), StripDisposition::Removed),
            ]
        );

        let sites = dispositions("const x = console.log(load());");
        assert_eq!(
            sites,
            [("console.log".to_string(), StripDisposition::RemovedSideEffectsLost)]
        );
    }

    #[test]
    fn declared_pure_calls_keep_side_effects() {
        let options = CompressionOptions::with_pure_functions(["logger.log"]);
        let report = DiagnosticScanner::new(options)
            .scan_source("logger.log(track(x));
const y = logger.log('a');", SourceType::mjs())
            .unwrap();
        let dispositions: Vec<_> = report.sites.iter().map(|site| site.disposition).collect();
        assert_eq!(
            dispositions,
            [StripDisposition::RetainedSideEffects, StripDisposition::RetainedNested]
        );
        assert_eq!(report.retained().count(), 2);
        assert_eq!(report.side_effects_lost().count(), 0);
    }

    #[test]
    fn calls_inside_arguments_are_found() {
        let options = CompressionOptions::with_pure_functions(["logger.log"]);
        let report = DiagnosticScanner::new(options)
            .scan_source("logger.log(track(console.info('inner')));", SourceType::mjs())
            .unwrap();
        assert_eq!(report.sites.len(), 2);
        assert_eq!(report.sites[0].disposition, StripDisposition::RetainedSideEffects);
        assert_eq!(report.sites[1].callee, "console.info");
        assert_eq!(report.sites[1].disposition, StripDisposition::Removed);
    }

    #[test]
    fn calls_in_function_bodies_are_found() {
        let source = "export function save() {\n  console.warn('saving');\n  debugger;\n}\n";
        let sites = scan(source);
        assert_eq!(sites.len(), 2);
        assert_eq!((sites[0].line, sites[0].column), (2, 3));
        assert_eq!(sites[1].kind, SiteKind::Debugger);
        assert_eq!(sites[1].line, 3);
    }

    #[test]
    fn computed_string_member_is_a_path() {
        assert_eq!(dispositions(r#"console["log"]("x");"#)[0].0, "console.log");
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = DiagnosticScanner::new(CompressionOptions::default())
            .scan_source("console.log(", SourceType::mjs())
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
    }

    #[test]
    fn line_column_counts_characters() {
        assert_eq!(line_column("ab\ncé x", 7), (2, 4));
        assert_eq!(line_column("abc", 0), (1, 1));
        assert_eq!(line_column("abc", 99), (1, 4));
    }
}
