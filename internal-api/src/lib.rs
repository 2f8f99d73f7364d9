pub mod http_router;
