//! Parameter selector.

use crate::state::AppState;
use dioxus::prelude::*;
use wq_data::selection::SelectionEvent;

/// Dropdown of every parameter present in the data.
///
/// Shows a disabled placeholder until a parameter has been picked. The list
/// is not narrowed to the current site; a site without readings for the
/// chosen parameter shows the no-data state instead.
#[component]
pub fn ParameterSelector() -> Element {
    let mut state = use_context::<AppState>();
    let parameters = state
        .table
        .read()
        .as_ref()
        .map(|t| t.parameters().to_vec())
        .unwrap_or_default();
    let current = state
        .selection
        .read()
        .as_ref()
        .and_then(|s| s.selected_parameter.clone());

    let on_change = move |evt: Event<FormData>| {
        let parameter = evt.value();
        if parameter.is_empty() {
            return;
        }
        state.dispatch(SelectionEvent::ParameterSelected { parameter });
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "parameter-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Parameter: "
            }
            select {
                id: "parameter-select",
                onchange: on_change,
                option {
                    value: "",
                    disabled: true,
                    selected: current.is_none(),
                    "Select a parameter"
                }
                for parameter in parameters.iter() {
                    option {
                        value: "{parameter}",
                        selected: current.as_deref() == Some(parameter.as_str()),
                        "{parameter}"
                    }
                }
            }
        }
    }
}
