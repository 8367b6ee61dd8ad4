//! Stacking order of assets.
//!
//! Only assets have a z-index; text roles always paint above them. Values
//! need not be contiguous. Where z-indices tie, the asset's position in
//! the asset list breaks the tie (the sort is stable).

use crate::id::AssetId;
use crate::model::Asset;

/// Indices into `assets`, ordered by ascending z-index.
fn sorted_indices(assets: &[Asset]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..assets.len()).collect();
    order.sort_by_key(|&i| assets[i].z_index);
    order
}

fn swap_with_neighbour(assets: &mut [Asset], id: AssetId, forward: bool) -> bool {
    let order = sorted_indices(assets);
    let Some(rank) = order.iter().position(|&i| assets[i].id == id) else {
        return false;
    };
    let neighbour = if forward {
        order.get(rank + 1)
    } else {
        rank.checked_sub(1).and_then(|r| order.get(r))
    };
    let Some(&other) = neighbour else {
        return false;
    };
    let this = order[rank];
    let z = assets[this].z_index;
    assets[this].z_index = assets[other].z_index;
    assets[other].z_index = z;
    true
}

/// Swap z-index with the next asset up. `false` if already on top or
/// `id` is unknown.
pub fn bring_forward(assets: &mut [Asset], id: AssetId) -> bool {
    swap_with_neighbour(assets, id, true)
}

/// Swap z-index with the next asset down.
pub fn send_backward(assets: &mut [Asset], id: AssetId) -> bool {
    swap_with_neighbour(assets, id, false)
}

pub fn bring_to_front(assets: &mut [Asset], id: AssetId) -> bool {
    let Some(idx) = assets.iter().position(|a| a.id == id) else {
        return false;
    };
    assets[idx].z_index = next_front_z(assets);
    true
}

pub fn send_to_back(assets: &mut [Asset], id: AssetId) -> bool {
    let Some(idx) = assets.iter().position(|a| a.id == id) else {
        return false;
    };
    if assets.iter().any(|a| a.z_index == i32::MIN) {
        renumber(assets);
    }
    let min = assets.iter().map(|a| a.z_index).min().unwrap_or(0);
    assets[idx].z_index = min - 1;
    true
}

/// The z-index one above every asset. Renumbers first when the top of the
/// `i32` range is taken.
pub fn next_front_z(assets: &mut [Asset]) -> i32 {
    if assets.iter().any(|a| a.z_index == i32::MAX) {
        renumber(assets);
    }
    max_z_index(assets) + 1
}

/// Compact z-indices to `0..n`, keeping the current stacking order.
fn renumber(assets: &mut [Asset]) {
    log::debug!("renumbering z-indices of {} assets", assets.len());
    for (rank, i) in sorted_indices(assets).into_iter().enumerate() {
        assets[i].z_index = rank as i32;
    }
}

/// Assets in the order they are painted: the background layer first
/// regardless of its z-index, then everything else by ascending z-index.
pub fn paint_order(assets: &[Asset]) -> Vec<&Asset> {
    let mut ordered: Vec<&Asset> = assets.iter().collect();
    ordered.sort_by_key(|a| (!a.is_background, a.z_index));
    ordered
}

/// Highest z-index in use, or 0 for an empty list.
pub fn max_z_index(assets: &[Asset]) -> i32 {
    assets.iter().map(|a| a.z_index).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetCategory, AssetTransform, Placement};

    fn asset(name: &str, z: i32) -> Asset {
        Asset {
            id: AssetId::intern(name),
            src: format!("{name}.png"),
            category: AssetCategory::Image,
            placement: Placement::Center,
            transform: AssetTransform::default(),
            z_index: z,
            is_background: false,
        }
    }

    fn order(assets: &[Asset]) -> Vec<&str> {
        paint_order(assets).iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn forward_and_backward_swap_neighbours() {
        let mut assets = vec![asset("z_a", 1), asset("z_b", 2), asset("z_c", 3)];
        assert!(bring_forward(&mut assets, AssetId::intern("z_a")));
        assert_eq!(order(&assets), vec!["z_b", "z_a", "z_c"]);
        assert!(send_backward(&mut assets, AssetId::intern("z_c")));
        assert_eq!(order(&assets), vec!["z_b", "z_c", "z_a"]);
    }

    #[test]
    fn forward_on_top_is_noop() {
        let mut assets = vec![asset("t_a", 1), asset("t_b", 2)];
        assert!(!bring_forward(&mut assets, AssetId::intern("t_b")));
        assert!(!send_backward(&mut assets, AssetId::intern("t_a")));
        assert!(!bring_forward(&mut assets, AssetId::intern("t_missing")));
        assert_eq!(order(&assets), vec!["t_a", "t_b"]);
    }

    #[test]
    fn front_and_back_extend_range() {
        let mut assets = vec![asset("f_a", 1), asset("f_b", 5), asset("f_c", 3)];
        assert!(bring_to_front(&mut assets, AssetId::intern("f_a")));
        assert_eq!(assets[0].z_index, 6);
        assert!(send_to_back(&mut assets, AssetId::intern("f_b")));
        assert_eq!(assets[1].z_index, 2);
        assert_eq!(order(&assets), vec!["f_b", "f_c", "f_a"]);
    }

    #[test]
    fn front_then_back_never_ties() {
        let mut assets = vec![asset("n_a", 0), asset("n_b", 0), asset("n_c", 0)];
        bring_to_front(&mut assets, AssetId::intern("n_a"));
        send_to_back(&mut assets, AssetId::intern("n_b"));
        assert_ne!(assets[0].z_index, assets[1].z_index);
        assert_eq!(order(&assets), vec!["n_b", "n_c", "n_a"]);
    }

    #[test]
    fn exhausted_range_is_renumbered() {
        let mut assets = vec![asset("max_a", i32::MAX), asset("max_b", 7)];
        assert!(bring_to_front(&mut assets, AssetId::intern("max_b")));
        assert_eq!(order(&assets), vec!["max_a", "max_b"]);
        assert_eq!(assets[1].z_index, 2);

        let mut assets = vec![asset("min_a", 3), asset("min_b", i32::MIN)];
        assert!(send_to_back(&mut assets, AssetId::intern("min_a")));
        assert_eq!(order(&assets), vec!["min_a", "min_b"]);
        assert_eq!(assets[0].z_index, -1);
    }

    #[test]
    fn ties_follow_list_position() {
        let assets = vec![asset("tie_a", 2), asset("tie_b", 2), asset("tie_c", 1)];
        assert_eq!(order(&assets), vec!["tie_c", "tie_a", "tie_b"]);
    }

    #[test]
    fn background_paints_first() {
        let mut bg = asset("bg_layer", 99);
        bg.is_background = true;
        let assets = vec![asset("fg_a", 1), bg, asset("fg_b", -4)];
        assert_eq!(order(&assets), vec!["bg_layer", "fg_b", "fg_a"]);
    }

    #[test]
    fn random_sequences_keep_a_total_order() {
        let mut assets = vec![
            asset("seq_a", 1),
            asset("seq_b", 2),
            asset("seq_c", 3),
            asset("seq_d", 4),
        ];
        let ids: Vec<AssetId> = assets.iter().map(|a| a.id).collect();
        // Deterministic pseudo-random op sequence.
        let mut state = 7u32;
        for _ in 0..200 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(state >> 8) as usize % ids.len()];
            match (state >> 16) % 4 {
                0 => bring_forward(&mut assets, id),
                1 => send_backward(&mut assets, id),
                2 => bring_to_front(&mut assets, id),
                _ => send_to_back(&mut assets, id),
            };
            let painted = paint_order(&assets);
            assert_eq!(painted.len(), ids.len());
            for pair in painted.windows(2) {
                assert!(pair[0].z_index <= pair[1].z_index);
            }
        }
    }
}
