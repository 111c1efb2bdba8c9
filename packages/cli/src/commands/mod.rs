pub mod edit;
pub mod init;
pub mod palette;
pub mod show;

pub use edit::{
    add, move_node, remove, set_content, set_style, AddArgs, DragArgs, RemoveArgs, SetContentArgs,
    SetStyleArgs,
};
pub use init::{init, InitArgs};
pub use palette::palette;
pub use show::{show, ShowArgs};
