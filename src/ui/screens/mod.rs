mod loading;

pub(crate) use loading::{render_failed, render_loading};
