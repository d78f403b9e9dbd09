use leptos::prelude::*;
use log::warn;

use crate::components::regimen_graph::{GraphData, RegimenGraphCanvas};

/// Regimen graph as returned by the optimizer's `/graph` endpoint for a
/// small cardiometabolic case. One link uses the embedded-object endpoint form.
const SAMPLE_REGIMEN: &str = r#"{
	"nodes": [
		{"id": "Hypertension", "name": "Hypertension", "group": "condition"},
		{"id": "Type 2 Diabetes", "name": "Type 2 Diabetes", "group": "condition"},
		{"id": "Hyperlipidemia", "name": "Hyperlipidemia", "group": "condition"},
		{"id": "DB00722", "name": "Lisinopril", "group": "drug", "toxicity": 0.21},
		{"id": "DB00381", "name": "Amlodipine", "group": "drug", "toxicity": 0.18},
		{"id": "DB00331", "name": "Metformin", "group": "drug", "toxicity": 0.12},
		{"id": "DB09038", "name": "Empagliflozin", "group": "drug", "toxicity": 0.24},
		{"id": "DB01076", "name": "Atorvastatin", "group": "drug", "toxicity": 0.15},
		{"id": "DB00999", "name": "Hydrochlorothiazide Extended Release", "group": "drug", "toxicity": 0.2}
	],
	"links": [
		{"source": "Hypertension", "target": "DB00722", "value": 1},
		{"source": "Hypertension", "target": "DB00381", "value": 1},
		{"source": "Hypertension", "target": "DB00999", "value": 1},
		{"source": "Type 2 Diabetes", "target": "DB00331", "value": 1},
		{"source": "Type 2 Diabetes", "target": "DB09038", "value": 1},
		{"source": {"id": "Hyperlipidemia"}, "target": {"id": "DB01076"}, "value": 1}
	]
}"#;

fn sample_regimen() -> GraphData {
	GraphData::from_json(SAMPLE_REGIMEN).unwrap_or_else(|err| {
		warn!("{err}");
		GraphData::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_regimen);

	view! {
		<div class="regimen-page">
			<h1>"Regimen Network"</h1>
			<p class="subtitle">"Conditions in the center, candidate drugs on the outer ring."</p>
			<RegimenGraphCanvas data=graph_data />
		</div>
	}
}
