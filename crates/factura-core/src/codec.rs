//! # Invoice Codec
//!
//! The fixed-width text layout every invoice is stored in.
//!
//! ## Layout
//! ```text
//! 🧾 FACTURA ELECTRÓNICA - PERU DELIVERY
//! ==================================================
//! Producto                Precio   Cant.     Total
//! --------------------------------------------------   ◄── start marker
//! Pizza Margarita          10.00       2     20.00
//! Inca Kola                 5.00       1      5.00
//! --------------------------------------------------   ◄── end marker
//! Subtotal                       S/. 25.00
//! IGV (18%)                      S/. 4.50
//! TOTAL                          S/. 29.50             ◄── extract_total
//! ==================================================
//!
//! Columns: name 20 (left) │ price 10 (right) │ qty 8 (right) │ total 10 (right)
//! ```
//!
//! Parsing relies on these offsets: the name is the first 20 characters of
//! an item row, the rest is whitespace-separated numbers. [`render`] and
//! [`parse`] must change together, and so must [`render`] and
//! [`extract_total`].

use tracing::warn;

use crate::money::Money;
use crate::types::{InvoiceTotals, LineItem};
use crate::validation::{sanitize_text, validate_price, validate_quantity};
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Layout Constants
// =============================================================================

/// First line of every invoice file.
pub const TITLE: &str = "🧾 FACTURA ELECTRÓNICA - PERU DELIVERY";

/// Width of the separator lines.
pub const LINE_WIDTH: usize = 50;

/// Width of the product name column.
pub const NAME_WIDTH: usize = 20;

/// Longest name written into the name column; one column stays blank so the
/// name never runs into the price.
pub const MAX_RENDERED_NAME_CHARS: usize = 19;

const PRICE_WIDTH: usize = 10;
const QTY_WIDTH: usize = 8;
const TOTAL_WIDTH: usize = 10;
const LABEL_WIDTH: usize = 30;

pub const SUBTOTAL_LABEL: &str = "Subtotal";
pub const TAX_LABEL: &str = "IGV (18%)";
pub const TOTAL_LABEL: &str = "TOTAL";

/// Returned by [`extract_total`] when no total line is present.
pub const MISSING_TOTAL: &str = "0.00";

// =============================================================================
// Render
// =============================================================================

/// The name as it appears in the file: sanitised, then cut to at most 19
/// characters.
///
/// Newlines, pipes and quotes never reach the file, so no name can forge a
/// separator line or shift a column. Trailing whitespace left by the cut is
/// dropped, since parsing trims it anyway.
pub fn display_name(name: &str) -> String {
    let name = sanitize_text(name);
    if name.chars().count() > MAX_RENDERED_NAME_CHARS {
        name.chars()
            .take(MAX_RENDERED_NAME_CHARS)
            .collect::<String>()
            .trim_end()
            .to_string()
    } else {
        name
    }
}

/// Renders an invoice document.
///
/// Output is deterministic: the same items and totals always produce the
/// same bytes. Every line, the last included, ends with `\n`.
///
/// ## Example
/// ```rust
/// use factura_core::codec::{extract_total, render};
/// use factura_core::{compute_totals, LineItem, Money};
///
/// let items = vec![LineItem::new("Pizza", Money::from_cents(1000), 2)];
/// let text = render(&items, &compute_totals(&items));
/// assert_eq!(extract_total(&text), "23.60");
/// ```
pub fn render(items: &[LineItem], totals: &InvoiceTotals) -> String {
    let equals = "=".repeat(LINE_WIDTH);
    let dashes = "-".repeat(LINE_WIDTH);
    let mut out = String::new();

    push_line(&mut out, TITLE);
    push_line(&mut out, &equals);
    push_line(
        &mut out,
        &format!(
            "{:<nw$}{:>pw$}{:>qw$}{:>tw$}",
            "Producto",
            "Precio",
            "Cant.",
            "Total",
            nw = NAME_WIDTH,
            pw = PRICE_WIDTH,
            qw = QTY_WIDTH,
            tw = TOTAL_WIDTH,
        ),
    );
    push_line(&mut out, &dashes);

    for item in items {
        push_line(
            &mut out,
            &format!(
                "{:<nw$}{:>pw$}{:>qw$}{:>tw$}",
                display_name(&item.name),
                item.unit_price,
                item.quantity,
                item.line_total(),
                nw = NAME_WIDTH,
                pw = PRICE_WIDTH,
                qw = QTY_WIDTH,
                tw = TOTAL_WIDTH,
            ),
        );
    }

    push_line(&mut out, &dashes);
    push_line(&mut out, &summary_line(SUBTOTAL_LABEL, totals.subtotal));
    push_line(&mut out, &summary_line(TAX_LABEL, totals.tax));
    push_line(&mut out, &summary_line(TOTAL_LABEL, totals.grand_total));
    push_line(&mut out, &equals);

    out
}

fn summary_line(label: &str, amount: Money) -> String {
    format!(
        "{:<lw$} {} {}",
        label,
        CURRENCY_SYMBOL,
        amount,
        lw = LABEL_WIDTH
    )
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

// =============================================================================
// Parse
// =============================================================================

/// An item row that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number within the document.
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Everything [`parse_detailed`] recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedInvoice {
    pub items: Vec<LineItem>,
    pub skipped: Vec<SkippedLine>,
}

fn is_dash_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-')
}

/// Reads the item block back into line items.
///
/// Malformed rows are skipped, and so are rows whose price or quantity is
/// outside the valid range. A document without both boundary markers yields
/// an empty list.
pub fn parse(text: &str) -> Vec<LineItem> {
    parse_detailed(text).items
}

/// Like [`parse`], but also reports which rows were skipped and why.
pub fn parse_detailed(text: &str) -> ParsedInvoice {
    let lines: Vec<&str> = text.lines().collect();

    // The title line never counts as a marker, even if it is all dashes.
    let Some(start) = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| is_dash_line(line))
        .map(|(i, _)| i + 1)
    else {
        return ParsedInvoice::default();
    };

    let Some(end) = lines[start..]
        .iter()
        .position(|line| is_dash_line(line))
        .map(|offset| start + offset)
    else {
        return ParsedInvoice::default();
    };

    let mut parsed = ParsedInvoice::default();

    for (index, line) in lines[start..end].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = start + index + 1;
        match parse_item_line(line) {
            Ok(item) => parsed.items.push(item),
            Err(reason) => {
                warn!(line = line_number, content = %line, reason = %reason, "Skipping unreadable item line");
                parsed.skipped.push(SkippedLine {
                    line_number,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    parsed
}

fn parse_item_line(line: &str) -> Result<LineItem, String> {
    let name: String = line.chars().take(NAME_WIDTH).collect();
    let rest: String = line.chars().skip(NAME_WIDTH).collect();
    let name = name.trim();
    let mut fields: Vec<&str> = rest.split_whitespace().collect();

    // A 10-digit line total (9990000.00) fills its column and touches the
    // quantity, so fall back to the fixed column offsets.
    if fields.len() < 3 {
        fields = fixed_columns(&rest);
    }
    if fields.len() < 3 {
        return Err(format!("expected 3 numeric columns, found {}", fields.len()));
    }

    let price: Money = fields[0]
        .parse()
        .map_err(|_| format!("price '{}' is not a number", fields[0]))?;
    let quantity: i64 = fields[1]
        .parse()
        .map_err(|_| format!("quantity '{}' is not an integer", fields[1]))?;

    if name.is_empty() {
        return Err("product name is empty".to_string());
    }

    // Out-of-range values can only come from a hand-edited or damaged file.
    validate_price(price).map_err(|e| e.to_string())?;
    validate_quantity(quantity).map_err(|e| e.to_string())?;

    Ok(LineItem::new(name, price, quantity))
}

/// Splits the part after the name column at the rendered column widths.
fn fixed_columns(rest: &str) -> Vec<&str> {
    let boundaries = [0, PRICE_WIDTH, PRICE_WIDTH + QTY_WIDTH];
    let mut fields = Vec::with_capacity(3);

    for (i, &start) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).copied().unwrap_or(rest.len());
        match rest.get(start..end).map(str::trim) {
            Some(field) if !field.is_empty() => fields.push(field),
            _ => break,
        }
    }

    fields
}

// =============================================================================
// Total Extraction
// =============================================================================

/// Reads the grand total straight from the text, without parsing items.
///
/// Finds the first line containing both `TOTAL` and `S/.` and returns what
/// follows the marker, trimmed. Returns `"0.00"` when there is no such line.
///
/// `Subtotal` does not match because the check is case-sensitive.
pub fn extract_total(text: &str) -> String {
    text.lines()
        .find(|line| line.contains(TOTAL_LABEL) && line.contains(CURRENCY_SYMBOL))
        .and_then(|line| line.split(CURRENCY_SYMBOL).nth(1))
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| MISSING_TOTAL.to_string())
}

/// [`extract_total`] as [`Money`]; `None` when the text is not an amount.
pub fn extract_total_amount(text: &str) -> Option<Money> {
    extract_total(text).parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::compute_totals;

    fn item(name: &str, cents: i64, qty: i64) -> LineItem {
        LineItem::new(name, Money::from_cents(cents), qty)
    }

    fn sample() -> Vec<LineItem> {
        vec![item("Pizza Margarita", 1000, 2), item("Inca Kola", 500, 1)]
    }

    fn render_items(items: &[LineItem]) -> String {
        render(items, &compute_totals(items))
    }

    #[test]
    fn test_render_golden_bytes() {
        let expected = concat!(
            "🧾 FACTURA ELECTRÓNICA - PERU DELIVERY\n",
            "==================================================\n",
            "Producto                Precio   Cant.     Total\n",
            "--------------------------------------------------\n",
            "Pizza Margarita          10.00       2     20.00\n",
            "Inca Kola                 5.00       1      5.00\n",
            "--------------------------------------------------\n",
            "Subtotal                       S/. 25.00\n",
            "IGV (18%)                      S/. 4.50\n",
            "TOTAL                          S/. 29.50\n",
            "==================================================\n",
        );
        assert_eq!(render_items(&sample()), expected);
    }

    #[test]
    fn test_render_truncates_long_names() {
        let text = render_items(&[item("Lomo Saltado Especial de la Casa", 3500, 1)]);
        let row = text.lines().nth(4).unwrap();
        assert!(row.starts_with("Lomo Saltado Especi "));
        assert_eq!(display_name("Lomo Saltado Especial de la Casa"), "Lomo Saltado Especi");
    }

    #[test]
    fn test_display_name_drops_trailing_space_from_cut() {
        // 19th character is a space
        assert_eq!(display_name("Arroz con Pollo al  Horno"), "Arroz con Pollo al");
        assert_eq!(display_name("Short"), "Short");
    }

    #[test]
    fn test_round_trip() {
        let items = vec![
            item("Pizza Margarita", 1000, 2),
            item("Ají de Gallina", 2250, 3),
            item("Chicharrón de Cerdo Grande", 1_000_000, 999),
            item("Té", 1, 1),
        ];
        let parsed = parse(&render_items(&items));

        assert_eq!(parsed.len(), items.len());
        for (original, back) in items.iter().zip(&parsed) {
            assert_eq!(back.name, display_name(&original.name));
            assert_eq!(back.unit_price, original.unit_price);
            assert_eq!(back.quantity, original.quantity);
        }
    }

    #[test]
    fn test_render_parse_render_is_idempotent() {
        let cases = vec![
            sample(),
            vec![item("Ají de Gallina", 2250, 3), item("Té", 1, 1)],
            // exactly 19 characters
            vec![item("Causa Limeña Rellen", 1890, 4)],
            vec![item("Chicharrón Grande", 1_000_000, 999)],
            vec![item("Pizza Margarita", 1000, 2), item("Chicha Morada", 1, 1), item("Ají de Gallina", 1_000_000, 999)],
        ];

        for items in cases {
            let first = render_items(&items);
            let second = render_items(&parse(&first));
            assert_eq!(first, second, "not idempotent for {:?}", items);
        }
    }

    #[test]
    fn test_render_sanitises_names() {
        let items = vec![
            item("Pizza\n-----", 1000, 2),
            item("Lomo | \"Saltado\"", 2500, 1),
            item("Inca\tKola's", 500, 1),
        ];
        let text = render_items(&items);

        // 9 fixed lines plus one per item; the newline did not leak through
        assert_eq!(text.lines().count(), 9 + items.len());

        let parsed = parse_detailed(&text);
        assert!(parsed.skipped.is_empty());
        let names: Vec<&str> = parsed.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza -----", "Lomo Saltado", "Inca Kola s"]);
        assert_eq!(parsed.items[0].unit_price, Money::from_cents(1000));
        assert_eq!(parsed.items[0].quantity, 2);
    }

    #[test]
    fn test_parse_skips_out_of_range_rows() {
        let text = render_items(&sample()).replace(
            "Pizza Margarita          10.00       2     20.00\n",
            "Pizza               90000000000000000.00 999 1.00\n",
        );

        let parsed = parse_detailed(&text);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].name, "Inca Kola");
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].reason, "price cannot exceed 10000.00");

        let text = render_items(&sample()).replace(
            "Inca Kola                 5.00       1      5.00\n",
            "Inca Kola                 5.00       0      0.00\n",
        );
        let parsed = parse_detailed(&text);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.skipped[0].reason, "quantity must be greater than 0");
    }

    #[test]
    fn test_parse_without_markers_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("just some text\nand more").is_empty());

        // Start marker but no end marker
        let text = "title\n-----\nPizza                    10.00       2     20.00\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_parse_ignores_dash_title_line() {
        let text = "-----\nheader\n-----\nPizza                    10.00       2     20.00\n-----\n";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Pizza");
    }

    #[test]
    fn test_parse_skips_bad_lines() {
        let mut text = render_items(&sample());
        text = text.replace(
            "Inca Kola                 5.00       1      5.00\n",
            "Inca Kola                 abc       1      5.00\n\n                          1.00       1      1.00\nBroken\n",
        );

        let parsed = parse_detailed(&text);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].name, "Pizza Margarita");
        assert_eq!(parsed.skipped.len(), 3);
        assert_eq!(parsed.skipped[0].line_number, 6);
        assert!(parsed.skipped[0].reason.contains("price"));
        assert_eq!(parsed.skipped[1].reason, "product name is empty");
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let text = render_items(&sample()).replace('\n', "\r\n");
        assert_eq!(parse(&text).len(), 2);
        assert_eq!(extract_total(&text), "29.50");
    }

    #[test]
    fn test_extract_total() {
        assert_eq!(extract_total(&render_items(&sample())), "29.50");
        assert_eq!(
            extract_total_amount(&render_items(&sample())),
            Some(Money::from_cents(2950))
        );
    }

    #[test]
    fn test_extract_total_missing() {
        assert_eq!(extract_total("no totals here"), "0.00");
        assert_eq!(extract_total("Subtotal S/. 10.00"), "0.00");
        assert_eq!(extract_total("TOTAL without marker"), "0.00");
        assert_eq!(extract_total_amount("TOTAL S/. n/a"), None);
    }
}
