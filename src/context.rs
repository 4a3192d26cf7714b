use crate::{settings::Settings, store::Store, ui::spinner::Spinner};

#[derive(Debug)]
pub struct Context<'a> {
    pub store: &'a mut Store,
    pub settings: &'a Settings,
    pub spinner: &'a Spinner,
}
