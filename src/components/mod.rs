pub mod regimen_graph;
