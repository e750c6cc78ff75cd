pub mod grid_line;
