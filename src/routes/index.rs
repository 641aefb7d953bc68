use crate::state::RegistrarState;
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RegistrarState>) -> Markup {
    const SECTIONS: [(&str, &str); 5] = [
        ("/students", "Students"),
        ("/courses", "Courses"),
        ("/addresses", "Addresses"),
        ("/students/enrol", "Enrol Student"),
        ("/students/details", "Student Details"),
    ];

    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            h1 class="text-2xl font-semibold mb-6 text-center" {
                "Registrar"
            }
            p class="text-gray-300 mb-6 text-center" {
                "Manage the school's records."
            }

            div class="grid grid-cols-2 gap-4" {
                @for (href, text) in SECTIONS {
                    a href=(href) class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded text-center" {
                        (text)
                    }
                }
            }
        }
    })
}
