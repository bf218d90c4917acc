use crate::game::ResolvedGame;

/// Progress callbacks for a library batch.
///
/// `on_snapshot` fires once with every game in `loading` state before any
/// remote request is made. `on_update` then fires once per game, in completion
/// order. Both default to no-ops.
pub trait LibraryObserver {
    fn on_snapshot(&mut self, _games: &[ResolvedGame]) {}

    fn on_update(&mut self, _game: &ResolvedGame) {}
}

/// No streaming.
impl LibraryObserver for () {}

impl<T: LibraryObserver + ?Sized> LibraryObserver for &mut T {
    fn on_snapshot(&mut self, games: &[ResolvedGame]) {
        (**self).on_snapshot(games);
    }

    fn on_update(&mut self, game: &ResolvedGame) {
        (**self).on_update(game);
    }
}
