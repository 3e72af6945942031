mod test_decimalize;
mod test_key_wrap;
mod test_visa_cvv;
