use std::ops::Deref;

// Blocks
//------------------------------------------------------------------------------

/// Deals codewords round-robin into `count` blocks: codeword `i` lands in
/// block `i % count`. Earlier blocks end up one codeword longer when the
/// length does not divide evenly.
pub fn stripe<T: Copy>(data: &[T], count: usize) -> Vec<Vec<T>> {
    debug_assert!(count > 0, "Block count must be positive");

    let mut blocks = vec![Vec::with_capacity(data.len().div_ceil(count)); count];
    for (i, &d) in data.iter().enumerate() {
        blocks[i % count].push(d);
    }
    blocks
}

/// Inverse of [`stripe`], also the column-wise interleaving used to lay out
/// ecc blocks.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
