pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        match self.peek() {
            Some(item) if item == pat => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Advances until the next item would satisfy `stop`, or the end.
    fn skip_until(&mut self, mut stop: impl FnMut(&Self::Item) -> bool) {
        while matches!(self.peek(), Some(item) if !stop(&item)) {
            self.next();
        }
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
