//! SQL generation from a parsed filter.
//!
//! Built-in fields are plain columns of the event table and compile to
//! ordinary comparisons. Properties live in a separate key/value table with
//! any number of rows per event, so each property comparison becomes an
//! aggregate over that event's rows, evaluated inside a correlated
//! `id IN (SELECT logId ... GROUP BY logId HAVING ...)` sub-query.
//!
//! Adjacent property comparisons share one sub-query. The generator tracks
//! whether it is currently inside such a "property scope" and opens it when
//! entering a property-only region of the tree and closes it when leaving one.
//!
//! ```text
//! prob1 = 'value1' or @message like '%search%'
//! ```
//!
//! becomes
//!
//! ```text
//! id IN (SELECT logId FROM log_property GROUP BY logId HAVING SUM(name = 'prob1' AND value = 'value1') > 0) OR message LIKE '%search%'
//! ```

use tracing::trace;

use crate::{
    ast::{CompareOp, Expr},
    dialect::{Dialect, OP, PNAME, PROPERTY_VALUE_COLUMN, PVAL, VALCOL},
    value::LiteralValue,
};

/// State threaded through one generation pass.
#[derive(Debug, Default)]
struct GenContext {
    output: String,
    /// Inside an open `id IN (... HAVING` sub-query
    inside_property_scope: bool,
    /// Comparison template awaiting its `|PNAME|` and `|PVAL|`
    template: Option<String>,
    /// The pending template is a property aggregate
    property_template: bool,
}

/// Walks an expression tree once and emits a boolean SQL expression.
pub struct SqlGenerator<'d> {
    dialect: &'d dyn Dialect,
}

/// Generates the SQL predicate for `expr` in the given dialect.
pub fn generate(expr: &Expr, dialect: &dyn Dialect) -> String {
    SqlGenerator::new(dialect).generate(expr)
}

impl<'d> SqlGenerator<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        SqlGenerator { dialect }
    }

    pub fn generate(&self, expr: &Expr) -> String {
        let mut ctx = GenContext::default();
        self.resolve(expr, &mut ctx);
        if ctx.inside_property_scope {
            self.close_scope(&mut ctx);
        }
        ctx.output
    }

    fn open_scope(&self, expr: &Expr, ctx: &mut GenContext) {
        if ctx.inside_property_scope || !expr.is_all_property() {
            return;
        }
        trace!(table = self.dialect.property_table_name(), "opening property scope");
        ctx.output.push_str("id IN (SELECT logId FROM ");
        ctx.output.push_str(self.dialect.property_table_name());
        ctx.output.push_str(" GROUP BY logId HAVING ");
        ctx.inside_property_scope = true;
    }

    fn close_scope(&self, ctx: &mut GenContext) {
        trace!("closing property scope");
        ctx.output.push(')');
        ctx.inside_property_scope = false;
    }

    fn resolve(&self, expr: &Expr, ctx: &mut GenContext) {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let property = expr.is_all_property();
                let template = self.comparison_template(*operator, right, property);

                self.open_scope(expr, ctx);
                ctx.template = Some(template);
                ctx.property_template = property;
                self.resolve(left, ctx);
                self.resolve(right, ctx);

                if let Some(filled) = ctx.template.take() {
                    ctx.output.push_str(&filled);
                }
            }
            Expr::Grouping(inner) => {
                self.open_scope(expr, ctx);
                ctx.output.push('(');
                self.resolve(inner, ctx);
                // A mixed group must not leak a scope opened by its last operand
                if ctx.inside_property_scope && !expr.is_all_property() {
                    self.close_scope(ctx);
                }
                ctx.output.push(')');
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                self.resolve(left, ctx);
                if ctx.inside_property_scope && !expr.is_all_property() {
                    self.close_scope(ctx);
                }
                ctx.output.push(' ');
                ctx.output.push_str(operator.sql());
                ctx.output.push(' ');
                self.resolve(right, ctx);
            }
            Expr::Variable(token) => {
                if let Some(template) = ctx.template.as_mut() {
                    *template = template.replacen(PNAME, &token.text, 1);
                }
            }
            Expr::Literal(value) => {
                let text = self.literal_sql(value, ctx.property_template);
                if let Some(template) = ctx.template.as_mut() {
                    *template = template.replacen(PVAL, &text, 1);
                }
            }
        }
    }

    /// Picks the comparison shape, leaving `|PNAME|` and `|PVAL|` to fill.
    fn comparison_template(&self, operator: CompareOp, right: &Expr, property: bool) -> String {
        if !property {
            return format!("{PNAME} {} {PVAL}", operator.sql());
        }

        let numeric = matches!(right, Expr::Literal(value) if value.is_numeric());
        let value_column = if numeric {
            self.dialect.numeric_cast_expression(PROPERTY_VALUE_COLUMN)
        } else {
            PROPERTY_VALUE_COLUMN.to_string()
        };

        self.dialect
            .property_filter_template(operator.is_exclusion())
            .replacen(VALCOL, &value_column, 1)
            .replacen(OP, operator.inclusive_sql(), 1)
    }

    /// Property values are stored as text, so booleans compared against a
    /// property are quoted; built-in columns get the dialect's spelling.
    fn literal_sql(&self, value: &LiteralValue, property: bool) -> String {
        match value {
            LiteralValue::Boolean(b) if property => format!("'{}'", b),
            LiteralValue::Boolean(b) => self.dialect.boolean_literal(*b).to_string(),
            LiteralValue::String(s) => self.dialect.quote_string(s),
            LiteralValue::Number(n) => n.to_string(),
        }
    }
}
