/// Keeps the items whose score is among the `top_n` highest distinct scores.
///
/// Items are sorted best-first (stable, so equal scores keep their input
/// order) and every distinct score counts as one rank. All items of the last
/// admitted rank are kept, so `[4, 5, 5, 3]` with `top_n = 2` yields
/// `[5, 5, 4]`.
pub fn select_top_ranks<T, K, F>(mut items: Vec<T>, top_n: usize, score: F) -> Vec<T>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| score(b).cmp(&score(a)));

    let mut rank = 0;
    let mut prev: Option<K> = None;
    let mut cut = items.len();
    for (i, item) in items.iter().enumerate() {
        let s = score(item);
        if prev != Some(s) {
            prev = Some(s);
            rank += 1;
        }
        if rank > top_n {
            cut = i;
            break;
        }
    }
    items.truncate(cut);
    items
}
