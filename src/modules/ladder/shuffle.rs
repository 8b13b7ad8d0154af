use rand::Rng;

/// Random ranking for `n` participants: every value in `1..=n` exactly once,
/// each of the `n!` orders equally likely (Fisher-Yates).
pub fn ranking<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut ranks: Vec<usize> = (1..=n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        ranks.swap(i, j);
    }
    ranks
}

pub fn shuffle_ranks(n: usize) -> Vec<usize> {
    ranking(n, &mut rand::thread_rng())
}
