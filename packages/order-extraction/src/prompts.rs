//! Prompts for order extraction.
//!
//! The user prompt walks the model through two mutually exclusive layouts:
//! a summary sheet (items laid out horizontally, closed by a grand-total
//! row) and a standard order sheet (items listed vertically).

/// Row label that marks a summary sheet.
pub const DEFAULT_GRAND_TOTAL_MARKER: &str = "Tổng Cộng";

/// System-level directive sent alongside every extraction.
pub const SYSTEM_INSTRUCTION: &str = "You are a highly efficient, specialized API for parsing Excel data. \
Your sole function is to follow the user's workflow instructions precisely and return the data \
in the specified JSON format as quickly as possible. Do not add any commentary or explanation.";

/// Prompt for extracting an order from CSV text.
pub const EXTRACT_ORDER_PROMPT: &str = r#"Analyze the provided CSV data from an Excel spreadsheet and extract order information. Follow this prioritized workflow:

**Priority 1: Summary Format (Check for '{marker}')**
1.  Scan the data for a row containing the text '{marker}'.
2.  If this row is found, you are dealing with a summary file. The items and their total quantities are listed horizontally in this row. The device names are in the header row above it.
3.  Extract all device names and their corresponding quantities from the '{marker}' row.
4.  The 'orderTitle' and 'deliveryDate' may not be present; return empty strings for them.
5.  The shipping information is located in a separate area. Find it and extract it.

**Priority 2: Standard Format (If '{marker}' is not found)**
1.  If no '{marker}' row exists, treat this as a standard order file.
2.  The items are listed vertically in two columns, 'Tên thiết bị' (Item Name) and 'SL' (Quantity).
3.  Extract the 'orderTitle', 'deliveryDate', and all items with their quantities.
4.  Extract the shipping information.

**Key Extraction Rules for both formats:**
-   **Shipping Information**: For the 'recipient' field, you MUST extract the entire, complete string. This includes any ID numbers, the recipient's name, and the phone number (SĐT). Do not omit any part of it.
-   **Output**: Your final output must be a single JSON object that strictly adheres to the provided schema.

CSV Data:
---
{csv_data}
---"#;

/// Build the extraction prompt for `raw_table`.
///
/// The table is embedded verbatim; it is substituted last so placeholder-like
/// text inside the table is left alone.
pub fn format_extract_order_prompt(raw_table: &str, grand_total_marker: &str) -> String {
    EXTRACT_ORDER_PROMPT
        .replace("{marker}", grand_total_marker)
        .replace("{csv_data}", raw_table)
}
