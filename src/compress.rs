//! Path compression over the shared parent/ancestor array used by SLT and
//! SNCA (`parent` is time-multiplexed with the Lengauer–Tarjan
//! "ancestor" field once compression begins).
//!
//! The reference algorithm is naturally expressed as a recursion that
//! compresses from the topmost affected ancestor down to `v` as the call
//! stack unwinds. It is rewritten here as an explicit two-pass walk — up to
//! find the compression boundary, then back down applying it — to avoid
//! language-level recursion on a spanning tree whose depth can approach the
//! vertex count.

/// Walk from `v` toward the root through `parent` while `parent[x] > c`,
/// compressing every such `x`'s parent pointer to point directly at the
/// first ancestor at or below the threshold `c`, and propagating the
/// minimum-weight label along the way. `weight` maps a `label` entry to the
/// rank used for comparisons: `semi[x]` for SLT (where `label` holds vertex
/// ids), or the identity for SNCA (where `label` already holds semidominator
/// ranks directly).
///
/// `chain` is scratch owned by the caller: cleared here, never reallocated,
/// so a dominator call's whole run through its `i` loop touches the heap
/// only for the arrays it allocates once up front.
fn rcompress_with(v: u32, parent: &mut [u32], label: &mut [u32], c: u32, chain: &mut Vec<u32>, weight: impl Fn(u32) -> u32) {
    if parent[v as usize] <= c {
        return;
    }

    // Collect v and every strict ancestor whose own parent is still above
    // the threshold; stop just short of the first ancestor that is already
    // compressed to (or naturally at) the boundary.
    chain.clear();
    chain.push(v);
    let mut x = v;
    loop {
        let p = parent[x as usize];
        if parent[p as usize] > c {
            x = p;
            chain.push(x);
        } else {
            break;
        }
    }

    // Apply the compression from the topmost collected ancestor down to v,
    // matching the order in which a recursive implementation would unwind.
    for &node in chain.iter().rev() {
        let ancestor = parent[node as usize];
        if weight(label[ancestor as usize]) < weight(label[node as usize]) {
            label[node as usize] = label[ancestor as usize];
        }
        parent[node as usize] = parent[ancestor as usize];
    }
}

/// `rcompress` for SLT: `label` holds vertex ids, compared via `semi`.
pub fn rcompress_slt(v: u32, parent: &mut [u32], semi: &[u32], label: &mut [u32], c: u32, chain: &mut Vec<u32>) {
    rcompress_with(v, parent, label, c, chain, |x| semi[x as usize]);
}

/// `rcompress` for SNCA: `label` already holds semidominator ranks.
pub fn rcompress_snca(v: u32, parent: &mut [u32], label: &mut [u32], c: u32, chain: &mut Vec<u32>) {
    rcompress_with(v, parent, label, c, chain, |x| x);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_when_parent_at_or_below_threshold() {
        let mut parent = vec![0, 0, 1];
        let semi = vec![0, 1, 2];
        let mut label = vec![0, 1, 2];
        let mut chain = Vec::new();
        rcompress_slt(2, &mut parent, &semi, &mut label, 1, &mut chain);
        assert_eq!(parent, vec![0, 0, 1]);
        assert_eq!(label, vec![0, 1, 2]);
    }

    #[test]
    fn compresses_chain_to_boundary_and_propagates_minimum() {
        // Tree: 1 (root) <- 2 <- 3 <- 4, semi[2]=5 (smallest), semi[3]=9, semi[4]=9.
        // rcompress(4, c=1) should point 4's (and 3's) parent straight at 1
        // and pull the minimum-semi label (2) down to both.
        let mut parent = vec![0, 0, 1, 2, 3];
        let semi = vec![0, 0, 5, 9, 9];
        let mut label = vec![0, 1, 2, 3, 4];
        let mut chain = Vec::new();

        rcompress_slt(4, &mut parent, &semi, &mut label, 1, &mut chain);

        assert_eq!(parent[4], 1);
        assert_eq!(parent[3], 1);
        assert_eq!(label[4], 2);
        assert_eq!(label[3], 2);
        // The boundary node (2) and root (1) are untouched.
        assert_eq!(parent[2], 1);
        assert_eq!(label[2], 2);
    }

    #[test]
    fn snca_variant_compares_label_directly() {
        let mut parent = vec![0, 0, 1, 2];
        let mut label = vec![0, 1, 5, 5];
        let mut chain = Vec::new();
        rcompress_snca(3, &mut parent, &mut label, 1, &mut chain);
        assert_eq!(parent[3], 1);
        assert_eq!(label[3], 1);
    }
}
