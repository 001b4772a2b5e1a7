/*
    lgptool

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/
use crate::args::names_parser;
use bpaf::{construct, long, Parser};
use lgptape::{serial::DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct ReadParams {
    pub(crate) port: Option<String>,
    pub(crate) baud: u32,
    pub(crate) timeout_ms: u64,
    pub(crate) names: Vec<PathBuf>,
}

fn port_parser() -> impl Parser<String> {
    long("port")
        .short('p')
        .argument::<String>("PORT")
        .help("Serial port of the tape reader, by name or number. Prompted for if not given.")
}

fn baud_parser() -> impl Parser<u32> {
    long("baud")
        .argument::<u32>("BAUD")
        .help("Baud rate of the serial port. USB CDC readers ignore this.")
        .fallback(DEFAULT_BAUD_RATE)
}

fn timeout_parser() -> impl Parser<u64> {
    long("timeout")
        .argument::<u64>("MILLISECONDS")
        .help("Time without data after which the tape is considered finished")
        .fallback(DEFAULT_READ_TIMEOUT_MS)
        .guard(|&ms| ms >= 10, "Timeout must be at least 10 milliseconds")
}

pub(crate) fn read_parser() -> impl Parser<ReadParams> {
    let port = port_parser().optional();
    let baud = baud_parser();
    let timeout_ms = timeout_parser();
    let names = names_parser();

    construct!(ReadParams {
        port,
        baud,
        timeout_ms,
        names
    })
}
