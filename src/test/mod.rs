mod fetch;
mod screener;
