//! Summary statistics table.

use dioxus::prelude::*;
use wq_data::summary::{Summary, SummaryRow, NO_DATA_MESSAGE};

#[derive(Props, Clone, PartialEq)]
pub struct SummaryTableProps {
    pub summary: Summary,
}

/// One-row statistics table, or the no-data message.
#[component]
pub fn SummaryTable(props: SummaryTableProps) -> Element {
    let Some(row) = props.summary.row() else {
        return rsx! {
            div {
                style: "padding: 12px 16px; margin: 8px 0; background: #F5F5F5; color: #616161; border-radius: 4px; border: 1px solid #E0E0E0;",
                "{NO_DATA_MESSAGE}"
            }
        };
    };

    rsx! {
        table {
            style: "border-collapse: collapse; margin: 8px 0; font-size: 13px;",
            thead {
                tr {
                    for header in SummaryRow::HEADERS {
                        th {
                            style: "text-align: left; padding: 4px 10px; border-bottom: 2px solid #BDBDBD;",
                            "{header}"
                        }
                    }
                }
            }
            tbody {
                tr {
                    for cell in row.cells() {
                        td {
                            style: "padding: 4px 10px; border-bottom: 1px solid #E0E0E0;",
                            "{cell}"
                        }
                    }
                }
            }
        }
    }
}
