//! Semi-NCA: two-phase semidominator computation followed by an NCA climb
//! in the dominator tree built so far.

use super::Counters;
use crate::compress::rcompress_snca;
use crate::flow_graph::{Graph, Label};
use crate::traverse::dfs_preorder;

pub fn snca(g: &Graph, r: Label, idom: &mut [Label]) -> Counters {
    let mut counters = Counters::default();
    idom.iter_mut().for_each(|x| *x = 0);

    let t = dfs_preorder(g, r);
    let nr = t.numbering.n;
    if nr == 0 {
        return counters;
    }
    counters.icount = 1;

    let num2label = &t.numbering.num2label;
    let label2num = &t.numbering.label2num;
    let mut parent = t.parent.clone();

    let mut semi = vec![0u32; nr + 1];
    // label doubles as the forest-minimum helper during compression and, for
    // already-finalized vertices, as the semidominator value itself — no
    // separate `semi[label[x]]` indirection is needed once that happens.
    let mut label = vec![0u32; nr + 1];
    for i in 0..=nr {
        semi[i] = i as u32;
        label[i] = i as u32;
    }
    let mut dom = vec![0u32; nr + 1];
    let mut chain = Vec::new();

    // Phase 1: semidominators.
    for i in (2..=nr).rev() {
        dom[i] = parent[i];
        let w = num2label[i];
        for &u in g.in_bounds(w) {
            let v = label2num[u as usize];
            if v != 0 {
                counters.ccount += 1;
                let u_prime = if v as usize <= i {
                    v
                } else {
                    rcompress_snca(v, &mut parent, &mut label, i as u32, &mut chain);
                    label[v as usize]
                };
                counters.ccount += 1;
                if semi[u_prime as usize] < semi[i] {
                    semi[i] = semi[u_prime as usize];
                }
            }
        }
        label[i] = semi[i];
        if semi[i] == parent[i] {
            counters.scount += 1;
        }
    }

    // Phase 2: dominators by NCA climb.
    dom[1] = 1;
    for i in 2..=nr {
        let mut j = dom[i];
        while j > semi[i] {
            counters.ccount += 1;
            j = dom[j as usize];
        }
        counters.ccount += 1;
        dom[i] = j;
    }

    idom[r as usize] = r;
    for i in 2..=nr {
        idom[num2label[i] as usize] = num2label[dom[i] as usize];
    }
    counters
}
