//! `urlc current` – print the URL of the current CGI request.

use urlc_core::RequestContext;

pub fn run_current(request: &RequestContext) {
    println!("{}", request.current_url());
}
