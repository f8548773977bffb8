//! Typed JSON interface for the single logical call the HTTP layer makes.
//!
//! The wire shape matches the service contract: the request is
//! `{ "matrix": <size x size array of integers>, "size": <integer> }` and the
//! response is the bare array-of-arrays holding the label grid.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::VoronoiGrid;
use grid_util::grid::Grid;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PartitionRequest {
    pub matrix: Vec<Vec<i32>>,
    pub size: usize,
}

/// Serializes transparently as the label grid itself, row by row.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PartitionResponse {
    pub labels: Vec<Vec<i32>>,
}

/// Validates the request, partitions the grid and flattens the label grid
/// back into rows. Pure apart from validation: a malformed request never
/// produces a partial result.
pub fn partition_request(request: &PartitionRequest) -> Result<PartitionResponse, GridError> {
    let grid = VoronoiGrid::from_matrix(&request.matrix, request.size)?;
    let labels = grid.partition();
    let rows = (0..request.size)
        .map(|y| (0..request.size).map(|x| labels.get(x, y)).collect())
        .collect::<Vec<Vec<i32>>>();
    Ok(PartitionResponse { labels: rows })
}
