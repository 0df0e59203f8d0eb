//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from state, then hand it
//! to the component renderers. Output goes to stdout, which Zellij captures
//! as the pane contents.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel: UIViewModel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
