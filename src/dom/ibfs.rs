//! IBFS: iterative dataflow fixed point over forward pre-order, seeded with
//! BFS-tree parents.

use super::Counters;
use crate::flow_graph::{Graph, Label};
use crate::nca::pre_intersect;
use crate::traverse::bfs_preorder;

pub fn ibfs(g: &Graph, r: Label, idom: &mut [Label]) -> Counters {
    let mut counters = Counters::default();
    idom.iter_mut().for_each(|x| *x = 0);

    let bfs = bfs_preorder(g, r);
    let nr = bfs.numbering.n;
    if nr == 0 {
        return counters;
    }

    // dom starts as the BFS tree parent; every reachable i >= 2 already has
    // a non-zero entry, so the inner loop only needs to skip unreached
    // predecessors, not zero dom entries.
    let mut dom = bfs.parent.clone();
    dom[1] = 1;

    let mut changed = true;
    while changed {
        changed = false;
        counters.icount += 1;
        for i in 2..=nr {
            let w = bfs.numbering.num2label[i];
            let mut new_idom = dom[i];
            for &u in g.in_bounds(w) {
                let pu = bfs.numbering.label2num[u as usize];
                counters.ccount += 1;
                if pu != 0 {
                    new_idom = pre_intersect(&dom, new_idom, pu);
                }
            }
            counters.ccount += 1;
            if new_idom != dom[i] {
                dom[i] = new_idom;
                changed = true;
            }
        }
    }

    idom[r as usize] = r;
    for i in 2..=nr {
        let label = bfs.numbering.num2label[i];
        idom[label as usize] = bfs.numbering.num2label[dom[i] as usize];
    }
    counters
}
