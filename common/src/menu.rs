use crate::command::{CommandTree, CommandTreeBuilder, TreeError};
use crate::keys::Key;
use crate::session::Session;

/// The viewer's command tree.
///
/// ```text
/// main
///   i  get item      -> prompt (digits) -> load
///   g  goto frame    -> prompt (digits) -> seek
///   space play/stop
///   j  last frame
///   k  next frame
///   f  switch fps
///   s  save jpg
///   p  playback      -> l loop / w wrap steps / r rewind
///   q  exit
/// ```
pub fn build_menu() -> Result<CommandTree<Session>, TreeError> {
    let mut menu = CommandTreeBuilder::new("main");
    let root = menu.root();

    menu.input(root, 'i', "get item", Some("input item id"), Key::is_digit, Session::load_item)?;
    menu.input(root, 'g', "goto frame", Some("input frame index"), Key::is_digit, Session::goto_frame)?;
    menu.action(root, ' ', "play/stop", None, |s: &mut Session| s.engine_mut().play_pause())?;
    menu.action(root, 'j', "last frame", None, |s: &mut Session| s.engine_mut().last_frame())?;
    menu.action(root, 'k', "next frame", None, |s: &mut Session| s.engine_mut().next_frame())?;
    menu.action(root, 'f', "switch fps", Some("24/12/6"), |s: &mut Session| s.engine_mut().switch_fps())?;
    menu.action(root, 's', "save jpg", Some("then next frame"), Session::save_frame)?;

    let playback = menu.menu(root, 'p', "playback", Some("end/step policies"))?;
    menu.action(playback, 'l', "toggle loop", Some("stop or loop at the end"), Session::toggle_loop)?;
    menu.action(playback, 'w', "toggle wrap", Some("clamp or wrap steps"), Session::toggle_wrap)?;
    menu.action(playback, 'r', "rewind", Some("back to frame 0"), |s: &mut Session| s.engine_mut().rewind())?;

    menu.action(root, 'q', "exit", None, Session::exit)?;

    Ok(menu.build())
}
