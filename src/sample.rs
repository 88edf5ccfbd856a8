//! Literal example rows shipped in each import template.

use chrono::{Duration, NaiveDate};

use crate::table::{Column, Table, instructions};

/// Container arrivals, counted back from the day the template is built.
pub const ARRIVAL_OFFSETS_DAYS: [i64; 6] = [10, 10, 5, 5, 2, 0];

const SUPPLIER_NAMES: [&str; 4] = [
    "China Electronics Supplier",
    "European Parts Ltd",
    "Asian Manufacturing Co",
    "Tech Components Inc",
];

const ITEM_SUPPLIERS: [&str; 6] = [
    "China Electronics Supplier",
    "China Electronics Supplier",
    "European Parts Ltd",
    "European Parts Ltd",
    "Asian Manufacturing Co",
    "Tech Components Inc",
];

const ITEM_NAMES: [&str; 6] = [
    "iPhone 14 Pro Max",
    "Samsung Galaxy S23",
    "MacBook Air M2",
    "iPad Pro 12.9\"",
    "Sony WH-1000XM4",
    "Dell XPS 13",
];

fn customers() -> Table {
    Table::new(
        "Customers",
        vec![
            Column::required(
                "customerName",
                [
                    "John Smith Trading",
                    "ABC Corporation",
                    "Global Imports Ltd",
                    "Local Business Co",
                ],
            ),
            Column::required(
                "phone",
                ["+1234567890", "+1987654321", "+1122334455", "+1555666777"],
            ),
        ],
    )
}

/// The six-sheet workbook covering every importable entity.
pub fn bulk_tables(today: NaiveDate) -> Vec<Table> {
    let customers = customers().describe(
        "Customer information with name and phone number",
        "Customer names must be unique per company",
    );

    let opening_balances = Table::new(
        "Customer Opening Balances",
        vec![
            Column::required(
                "customerName",
                ["John Smith Trading", "ABC Corporation", "Global Imports Ltd"],
            ),
            Column::required("openingBalance", [1500.00, 2300.50, 750.25]),
            Column::optional(
                "notes",
                [
                    "Previous credit balance",
                    "Outstanding from last month",
                    "Partial payment pending",
                ],
            ),
        ],
    )
    .describe(
        "Opening credit balances for existing customers",
        "customerName must match existing customer or one from Customers sheet",
    );

    let suppliers = Table::new(
        "Suppliers",
        vec![
            Column::required("suppliername", SUPPLIER_NAMES),
            Column::required(
                "contact",
                ["+86123456789", "+44987654321", "+65111222333", "+1444555666"],
            ),
            Column::required(
                "country",
                ["China", "United Kingdom", "Singapore", "United States"],
            ),
        ],
    )
    .describe(
        "Supplier information with contact details and country",
        "Supplier names must be unique per company",
    );

    let supplier_items = Table::new(
        "Supplier Items & Prices",
        vec![
            Column::required("suppliername", ITEM_SUPPLIERS),
            Column::required("itemName", ITEM_NAMES),
            Column::required("price", [1099.99, 999.99, 1199.99, 1099.99, 349.99, 899.99]),
        ],
    )
    .describe(
        "Items supplied by each supplier with their prices",
        "suppliername must match existing supplier or one from Suppliers sheet",
    );

    let arrivals = ARRIVAL_OFFSETS_DAYS.map(|days| today - Duration::days(days));
    let container_items = Table::new(
        "Container Items",
        vec![
            Column::required(
                "containerNo",
                [
                    "CONT2024001",
                    "CONT2024001",
                    "CONT2024002",
                    "CONT2024002",
                    "CONT2024003",
                    "CONT2024003",
                ],
            ),
            Column::required("suppliername", ITEM_SUPPLIERS),
            Column::required("itemName", ITEM_NAMES),
            Column::required("quantity", [50_i64, 30, 25, 20, 100, 15]),
            Column::required("unitPrice", [1050.00, 950.00, 1150.00, 1050.00, 320.00, 850.00]),
            Column::required("arrivalDate", arrivals),
            Column::required("year", [2024_i64; 6]),
        ],
    )
    .describe(
        "Container inventory with quantities and arrival dates",
        "arrivalDate format: YYYY-MM-DD, suppliername must exist",
    );

    let data = vec![
        customers,
        opening_balances,
        suppliers,
        supplier_items,
        container_items,
    ];
    let guide = instructions(&data, &[]);
    let mut tables = data;
    tables.push(guide);
    tables
}

/// Customers plus debit/credit opening balances.
pub fn customer_tables() -> Vec<Table> {
    let customers = customers().describe("Customer information", "Customer names must be unique");

    let opening_balances = Table::new(
        "Opening Balances",
        vec![
            Column::required(
                "customerName",
                [
                    "John Smith Trading",
                    "ABC Corporation",
                    "Global Imports Ltd",
                    "Local Business Co",
                ],
            ),
            Column::required("balanceType", ["debit", "debit", "credit", "debit"]),
            Column::required("amount", [1500.00, 2300.50, 750.25, 450.00]),
            Column::optional(
                "notes",
                [
                    "Customer owes us from previous invoices",
                    "Outstanding balance from last month",
                    "Customer has credit balance",
                    "Partial payment pending",
                ],
            ),
        ],
    )
    .describe(
        "Customer opening balances",
        "balanceType: \"debit\" (customer owes) or \"credit\" (customer has money). \
         customerName must match Customers sheet",
    );

    let data = vec![customers, opening_balances];
    let guide = instructions(
        &data,
        &[
            ["", "", "", ""],
            ["Balance Types:", "", "", ""],
            [
                "debit",
                "Customer owes money to us",
                "Use positive amount",
                "Will appear as receivable/debt",
            ],
            [
                "credit",
                "Customer has money with us",
                "Use positive amount",
                "Will appear as credit balance",
            ],
        ],
    );
    let mut tables = data;
    tables.push(guide);
    tables
}

/// Suppliers and the items (with prices) each one supplies.
pub fn supplier_tables() -> Vec<Table> {
    let suppliers = Table::new(
        "Suppliers",
        vec![
            Column::required(
                "supplierName",
                [
                    "China Electronics Co",
                    "European Parts Ltd",
                    "Asian Manufacturing",
                    "Tech Components Inc",
                ],
            ),
            Column::required(
                "contact",
                [
                    "+86-123-456-7890",
                    "+44-20-1234-5678",
                    "+65-6123-4567",
                    "+1-555-123-4567",
                ],
            ),
            Column::required(
                "country",
                ["China", "United Kingdom", "Singapore", "United States"],
            ),
        ],
    )
    .describe("Supplier information", "Supplier names must be unique");

    let items = Table::new(
        "Items & Prices",
        vec![
            Column::required(
                "supplierName",
                [
                    "China Electronics Co",
                    "China Electronics Co",
                    "European Parts Ltd",
                    "European Parts Ltd",
                    "Asian Manufacturing",
                    "Tech Components Inc",
                ],
            ),
            Column::required("itemName", ITEM_NAMES),
            Column::required("price", [1099.99, 999.99, 1199.99, 1099.99, 349.99, 899.99]),
        ],
    )
    .describe(
        "Items supplied by each supplier with prices",
        "supplierName must match Suppliers sheet exactly",
    );

    let data = vec![suppliers, items];
    let guide = instructions(&data, &[]);
    let mut tables = data;
    tables.push(guide);
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    #[test]
    fn bulk_sheets_and_row_counts() {
        let tables = bulk_tables(today());
        let shape: Vec<(&str, usize)> = tables
            .iter()
            .map(|t| (t.name.as_str(), t.validate().unwrap()))
            .collect();
        assert_eq!(
            shape,
            [
                ("Customers", 4),
                ("Customer Opening Balances", 3),
                ("Suppliers", 4),
                ("Supplier Items & Prices", 6),
                ("Container Items", 6),
                ("Instructions", 5),
            ]
        );
    }

    #[test]
    fn bulk_headers() {
        let tables = bulk_tables(today());
        assert_eq!(tables[0].headers(), ["customerName", "phone"]);
        assert_eq!(tables[1].headers(), ["customerName", "openingBalance", "notes"]);
        assert_eq!(tables[2].headers(), ["suppliername", "contact", "country"]);
        assert_eq!(tables[3].headers(), ["suppliername", "itemName", "price"]);
        assert_eq!(
            tables[4].headers(),
            [
                "containerNo",
                "suppliername",
                "itemName",
                "quantity",
                "unitPrice",
                "arrivalDate",
                "year"
            ]
        );
    }

    #[test]
    fn arrival_dates_count_back_from_today() {
        let tables = bulk_tables(today());
        let arrivals = &tables[4].columns[5];
        assert_eq!(arrivals.name, "arrivalDate");
        let shown: Vec<String> = arrivals.values.iter().map(CellValue::display).collect();
        assert_eq!(
            shown,
            [
                "2026-02-22",
                "2026-02-22",
                "2026-02-27",
                "2026-02-27",
                "2026-03-02",
                "2026-03-04"
            ]
        );
    }

    #[test]
    fn bulk_instructions_required_fields() {
        let tables = bulk_tables(today());
        let required: Vec<String> = tables[5].columns[2]
            .values
            .iter()
            .map(CellValue::display)
            .collect();
        assert_eq!(required[1], "customerName, openingBalance");
        assert_eq!(
            required[4],
            "containerNo, suppliername, itemName, quantity, unitPrice, arrivalDate, year"
        );
    }

    #[test]
    fn customer_and_supplier_variants() {
        let customers = customer_tables();
        let names: Vec<&str> = customers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Customers", "Opening Balances", "Instructions"]);
        assert_eq!(customers[2].validate().unwrap(), 6);

        let suppliers = supplier_tables();
        let names: Vec<&str> = suppliers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Suppliers", "Items & Prices", "Instructions"]);
        for table in &suppliers {
            table.validate().unwrap();
        }
    }
}
