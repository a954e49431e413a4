//! Dashboard tab: stat cards, charts and the specialization tally

use dioxus::prelude::*;

use crate::analytics::{ChartData, ChartKind, Dashboard, SpecializationCount};

const PALETTE: [&str; 6] = ["#2f6fed", "#d64545", "#e0a800", "#2f9e5a", "#7b4fd6", "#2b8ac6"];

#[component]
pub fn DashboardView(#[props(!optional)] dashboard: Option<Dashboard>) -> Element {
    let Some(dashboard) = dashboard else {
        return rsx! {
            div { class: "muted", "Loading dashboard..." }
        };
    };
    let stats = dashboard.stats;

    rsx! {
        section {
            id: "dashboard",

            div {
                class: "stats",
                StatCard { label: "Patients", value: stats.patients.to_string() }
                StatCard { label: "Doctors", value: stats.doctors.to_string() }
                StatCard { label: "Assignments", value: stats.assignments.to_string() }
                StatCard { label: "Average Age", value: stats.average_age.to_string() }
            }

            div {
                class: "charts",
                Chart { chart: dashboard.gender_chart.clone() }
                Chart { chart: dashboard.age_chart.clone() }
            }

            SpecializationList { specializations: dashboard.specializations.clone() }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat",
            div { class: "value", "{value}" }
            div { class: "muted", "{label}" }
        }
    }
}

#[component]
pub fn Chart(chart: ChartData) -> Element {
    rsx! {
        div {
            class: "chart",
            h3 { "{chart.title}" }
            {match chart.kind {
                ChartKind::Proportion => rsx! { ProportionBar { chart: chart.clone() } },
                ChartKind::Histogram => rsx! { Histogram { chart: chart.clone() } },
            }}
        }
    }
}

#[component]
fn ProportionBar(chart: ChartData) -> Element {
    if chart.total() == 0 {
        return rsx! {
            p { class: "muted", "No patients yet" }
        };
    }

    let segments: Vec<(String, String, String, String)> = chart
        .series
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let color = PALETTE[index % PALETTE.len()];
            (
                format!("{}: {}", count.label, count.count),
                format!("width: {:.1}%; background: {};", chart.percent(count.count), color),
                format!("{} ({})", count.label, count.count),
                format!("background: {};", color),
            )
        })
        .collect();
    let legend = segments.clone();

    rsx! {
        div {
            class: "proportion",
            for (index, (title, style, _, _)) in segments.into_iter().enumerate() {
                div { key: "{index}", class: "segment", title: "{title}", style: "{style}" }
            }
        }
        div {
            class: "legend",
            for (index, (_, _, label, swatch)) in legend.into_iter().enumerate() {
                span {
                    key: "{index}",
                    class: "legend-item",
                    span { class: "swatch", style: "{swatch}" }
                    "{label}"
                }
            }
        }
    }
}

#[component]
fn Histogram(chart: ChartData) -> Element {
    let max = chart.max();
    let columns: Vec<(String, usize, String)> = chart
        .series
        .iter()
        .map(|count| {
            (
                count.label.clone(),
                count.count,
                format!("height: {:.1}%;", bar_height(count.count, max)),
            )
        })
        .collect();

    rsx! {
        div {
            class: "histogram",
            for (label, count, style) in columns {
                div {
                    key: "{label}",
                    class: "column",
                    span { class: "muted", "{count}" }
                    div { class: "bar", style: "{style}" }
                    span { "{label}" }
                }
            }
        }
    }
}

fn bar_height(count: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        count as f64 * 100.0 / max as f64
    }
}

#[component]
fn SpecializationList(specializations: Vec<SpecializationCount>) -> Element {
    rsx! {
        div {
            class: "chart",
            h3 { "Specializations" }
            if specializations.is_empty() {
                p { class: "muted", "No doctors added yet" }
            } else {
                for entry in specializations {
                    div {
                        key: "{entry.specialization}",
                        class: "section-header",
                        span { "{entry.specialization}" }
                        span { class: "muted", {entry.label()} }
                    }
                }
            }
        }
    }
}
