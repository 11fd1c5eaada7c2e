//! Smoke test of the public facade: a local grid driven entirely through
//! the prelude surface.

use grappelli::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Vehicle {
	id: i64,
	plate: String,
	warehouse: Warehouse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Warehouse {
	city: String,
}

fn vehicles() -> Vec<Vehicle> {
	vec![
		Vehicle {
			id: 1,
			plate: "KA-1201".to_string(),
			warehouse: Warehouse {
				city: "Hamburg".to_string(),
			},
		},
		Vehicle {
			id: 2,
			plate: "KA-1305".to_string(),
			warehouse: Warehouse {
				city: "Munich".to_string(),
			},
		},
		Vehicle {
			id: 3,
			plate: "B-2217".to_string(),
			warehouse: Warehouse {
				city: "Berlin".to_string(),
			},
		},
	]
}

#[tokio::test]
async fn local_grid_through_the_prelude() {
	let grid = DataGrid::new(
		GridConfig::new("vehicles")
			.column(
				Column::new("plate")
					.header("Plate")
					.accessor("plate")
					.sortable(true),
			)
			.column(
				Column::new("warehouse")
					.header("Warehouse")
					.accessor("warehouse.city"),
			)
			.rows(vehicles())
			.search_key("plate"),
		None,
	)
	.unwrap();

	let snapshot = grid.snapshot();
	assert_eq!(snapshot.rows.len(), 3);
	assert_eq!(
		snapshot.visible_columns,
		vec!["plate".to_string(), "warehouse".to_string()]
	);

	grid.set_search_input("ka-");
	assert_eq!(grid.snapshot().rows.len(), 2);

	grid.set_sort("plate", SortOrder::Descending).unwrap();
	assert_eq!(grid.snapshot().rows[0].plate, "KA-1305");

	let export = grid.export_all(ExportFormat::Csv).await.unwrap();
	let text = String::from_utf8(export.data).unwrap();
	assert!(text.starts_with("Plate,Warehouse"));
	assert!(text.contains("KA-1305,Munich"));
	assert!(!text.contains("B-2217"));
}
