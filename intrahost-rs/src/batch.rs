use crate::{
    error::DrawError,
    infection::{Infection, Loads},
    models::IntraHostModel,
    random::seeded_stream,
    trajectory::Trajectory,
};
use log::info;
use rayon::prelude::*;

/// Draw one trajectory per infection, in parallel.
///
/// Infection `i` always uses the generator `seeded_stream(base_seed, i)`, so
/// the output is identical for any number of worker threads. Output order
/// follows input order. The first failure aborts the batch.
pub fn generate_batch<M, I>(
    model: &M,
    infections: &[I],
    loads: &Loads,
    base_seed: u64,
) -> Result<Vec<Trajectory>, DrawError>
where
    M: IntraHostModel + Sync,
    I: Infection + Sync,
{
    info!("drawing {} trajectories", infections.len());
    infections
        .par_iter()
        .enumerate()
        .map(|(i, infection)| {
            let mut rng = seeded_stream(base_seed, i);
            model.get_trajectory(infection, loads, &mut rng)
        })
        .collect()
}
