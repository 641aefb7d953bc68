use maud::{Markup, Render, html};

pub fn table(overall_title: impl Render, titles: &[&str], rows: Vec<Vec<Markup>>) -> Markup {
    html! {
        div class="container mx-auto" {
            (overall_title)
            div class="overflow-x-auto" {
                table class="min-w-full bg-gray-800 rounded shadow-md" {
                    thead class="bg-gray-700" {
                        tr {
                            @for title in titles {
                                th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                            }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                @for col in row {
                                    td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn supertitle(s: impl Render) -> Markup {
    html! {
        h1 class="text-3xl font-bold mb-6" {(s)}
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h2 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h3 class="text-xl font-semibold mb-2" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    ty: Option<&str>,
    value: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required[required] type=(ty.unwrap_or("text")) id=(id) name=(id) value=[value] class=(INPUT_CLASSES);
        },
    )
}

/// Submit button that reads "Loading..." while its request is in flight; pair
/// with `hx-disabled-elt` on the form.
pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
            span class="htmx-indicator italic text-gray-400" {"Loading..."}
        }
    }
}

pub fn danger_submit_button(text: &str) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-red-600 hover:bg-red-800 disabled:opacity-50 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text)
            }
            span class="htmx-indicator italic text-gray-400" {"Loading..."}
        }
    }
}

/// Inline outcome of a panel submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Render for Notice {
    fn render(&self) -> Markup {
        match self {
            Self::Success(msg) => html! {
                div class="bg-green-100 border border-green-400 text-green-800 px-4 py-3 rounded mb-4" role="status" {(msg)}
            },
            Self::Error(msg) => html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4" role="alert" {(msg)}
            },
            Self::Info(msg) => html! {
                p class="italic text-gray-400 mb-4" {(msg)}
            },
        }
    }
}

pub fn dash_if_none(value: Option<impl Render>) -> Markup {
    html! {
        @if let Some(value) = value {
            (value)
        } @else {
            span class="italic text-gray-500" {"-"}
        }
    }
}

pub fn render_nav() -> Markup {
    const LINKS: [(&str, &str); 5] = [
        ("/students", "Students"),
        ("/courses", "Courses"),
        ("/addresses", "Addresses"),
        ("/students/enrol", "Enrol Student"),
        ("/students/details", "Student Details"),
    ];

    html! {
        nav class="w-56 shrink-0 bg-gray-800 p-6 flex flex-col space-y-2 min-h-screen" {
            a href="/" class="text-xl font-bold mb-4 hover:text-blue-300" {"Registrar"}
            @for (href, text) in LINKS {
                a href=(href) class="block rounded px-3 py-2 font-medium text-gray-200 hover:bg-gray-700" {(text)}
            }
        }
    }
}
