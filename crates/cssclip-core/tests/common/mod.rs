pub mod css_server;
