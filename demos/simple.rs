use grid_util::grid::Grid;
use grid_voronoi::VoronoiGrid;

// Partitions the 10x10 campus grid from the service's smoke tests: walls of
// obstacles split the map into corridors, and five weighted bathrooms act as
// seeds. Each passable cell ends up labelled with the identifier of its
// closest bathroom.
fn main() {
    let matrix = vec![
        vec![0, -1, 0, 0, 0, 0, -1, 0, 12, 0],
        vec![47, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        vec![0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        vec![0, -1, 0, -1, 23, -1, 0, 0, 0, 0],
        vec![0, -1, 0, -1, 0, -1, 16, 0, 0, 0],
        vec![0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        vec![0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        vec![0, 0, 0, -1, 0, -1, 0, 0, 45, 0],
        vec![0, -1, 0, -1, 0, -1, 0, 0, 0, 0],
        vec![0, 0, 0, -1, 0, 0, 0, 0, 0, 0],
    ];
    let grid = VoronoiGrid::from_matrix(&matrix, 10).expect("sample matrix is valid");
    println!("{}", grid);
    let labels = grid.partition();
    println!("Labels:");
    for y in 0..labels.height() {
        let row = (0..labels.width())
            .map(|x| labels.get(x, y))
            .collect::<Vec<i32>>();
        println!("{:?}", row);
    }
}
