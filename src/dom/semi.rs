//! Semidominator computation alone, without the bucket bookkeeping SLT (C8)
//! layers on top. Used as a diagnostic entry point and by the property tests
//! that cross-check SLT's own `semi` array after phase 1.

use super::Counters;
use crate::compress::rcompress_slt;
use crate::flow_graph::{Graph, Label};
use crate::traverse::{dfs_preorder, TreeNumbering};

/// Semidominator ordinals, indexed by the pre-order ordinal this call itself
/// assigns (see [`TreeNumbering`]); `semi[i]` for `i` outside `1..=numbering.n`
/// is unused scratch.
pub struct SemiResult {
    pub numbering: TreeNumbering,
    pub semi: Vec<u32>,
}

pub fn semi_dominators(g: &Graph, r: Label) -> (SemiResult, Counters) {
    let mut counters = Counters::default();
    let numbering = dfs_preorder(g, r);
    let nr = numbering.numbering.n;

    let mut semi = vec![0u32; nr + 1];
    let mut label = vec![0u32; nr + 1];
    for i in 0..=nr {
        semi[i] = i as u32;
        label[i] = i as u32;
    }
    if nr == 0 {
        return (SemiResult { numbering, semi }, counters);
    }
    counters.icount = 1;

    let num2label = &numbering.numbering.num2label;
    let label2num = &numbering.numbering.label2num;
    let mut parent = numbering.parent.clone();
    let mut chain = Vec::new();

    for i in (2..=nr).rev() {
        let w = num2label[i];
        for &u in g.in_bounds(w) {
            counters.ccount += 1;
            let v = label2num[u as usize];
            if v != 0 {
                counters.ccount += 1;
                let u_prime = if v as usize <= i {
                    v
                } else {
                    rcompress_slt(v, &mut parent, &semi, &mut label, i as u32, &mut chain);
                    label[v as usize]
                };
                counters.ccount += 1;
                if semi[u_prime as usize] < semi[i] {
                    semi[i] = semi[u_prime as usize];
                }
            }
        }
        counters.ccount += 1;
        if semi[i] == parent[i] {
            counters.scount += 1;
        }
    }

    (SemiResult { numbering, semi }, counters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow_graph::GraphBuilder;

    #[test]
    fn diamond_semidominators_equal_parents() {
        // In a diamond every non-root vertex's semidominator coincides with
        // its DFS tree parent, since there is no "bypass" predecessor.
        let mut b = GraphBuilder::new(4, 1);
        b.add_arc(1, 2).add_arc(1, 3).add_arc(2, 4).add_arc(3, 4);
        let g = b.build();
        let (result, counters) = semi_dominators(&g, 1);
        for i in 2..=result.numbering.numbering.n {
            assert_eq!(result.semi[i], result.numbering.parent[i]);
        }
        assert_eq!(counters.icount, 1);
    }

    #[test]
    fn side_entry_loop_finds_ancestor_semidominator() {
        // 1->2->3->4->2, 2->5: vertex 3's only predecessor besides the tree
        // parent is 4, whose pre-order number exceeds 3's, so semi(3) stays
        // its tree parent (2); vertex 2 gets no such bypass either since its
        // sole non-tree predecessor, 4, is numbered after it.
        let mut b = GraphBuilder::new(5, 1);
        b.add_arc(1, 2).add_arc(2, 3).add_arc(3, 4).add_arc(4, 2).add_arc(2, 5);
        let g = b.build();
        let (result, _) = semi_dominators(&g, 1);
        let ord = |label: u32| result.numbering.numbering.label2num[label as usize] as usize;
        assert_eq!(result.semi[ord(2)], result.numbering.parent[ord(2)]);
    }
}
