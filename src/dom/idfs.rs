//! IDFS: iterative dataflow fixed point over reverse post-order.

use super::Counters;
use crate::flow_graph::{Graph, Label};
use crate::nca::intersect;
use crate::traverse::dfs_postorder;

/// Writes immediate dominators into `idom[0..=n_vertices]`. `idom[0]` is
/// always `0`; unreachable labels are left at `0`.
pub fn idfs(g: &Graph, r: Label, idom: &mut [Label]) -> Counters {
    let mut counters = Counters::default();
    idom.iter_mut().for_each(|x| *x = 0);

    let post = dfs_postorder(g, r);
    let nr = post.n;
    if nr == 0 {
        return counters;
    }

    // dom is indexed by post-order ordinal; the root always gets ordinal nr.
    let mut dom = vec![0u32; nr + 1];
    dom[nr] = nr as u32;

    let mut changed = true;
    while changed {
        changed = false;
        counters.icount += 1;
        for i in (1..nr).rev() {
            let w = post.num2label[i];
            let mut new_idom = 0u32;
            for &u in g.in_bounds(w) {
                let pu = post.label2num[u as usize];
                counters.ccount += 1;
                if dom[pu as usize] != 0 {
                    new_idom = if new_idom == 0 {
                        pu
                    } else {
                        intersect(&dom, new_idom, pu)
                    };
                    counters.ccount += 1;
                }
            }
            counters.ccount += 1;
            if new_idom != 0 && new_idom > dom[i] {
                dom[i] = new_idom;
                changed = true;
            }
        }
    }

    idom[r as usize] = r;
    for i in (1..nr).rev() {
        let label = post.num2label[i];
        let d = dom[i];
        if d != 0 {
            idom[label as usize] = post.num2label[d as usize];
        }
    }
    counters
}
