// Interface adapters: endpoint client and terminal front end.

pub mod clients;
pub mod console;
